use crate::config::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

/// A page the controller wants loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLoad {
    pub page_index: usize,
    pub page_size: usize,
}

/// Prev/next and page-size state for a remotely paged list.
///
/// The controller never loads anything itself: navigation returns the
/// [`PageLoad`] to run, and the owner reports back through
/// [`set_current_page`](Self::set_current_page) and
/// [`set_total_pages`](Self::set_total_pages) once the page has arrived.
#[derive(Debug, Clone)]
pub struct Pagination {
    current_page: usize,
    total_pages: usize,
    page_size: usize,
    page_sizes: Vec<usize>,
    can_go_prev: bool,
    can_go_next: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZES.to_vec(), DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_sizes: Vec<usize>, page_size: usize) -> Self {
        let mut pagination = Self {
            current_page: 0,
            total_pages: 1,
            page_size,
            page_sizes,
            can_go_prev: false,
            can_go_next: false,
        };
        pagination.update_controls();
        pagination
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
        self.update_controls();
    }

    pub fn set_total_pages(&mut self, pages: usize) {
        self.total_pages = pages;
        self.update_controls();
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn can_go_prev(&self) -> bool {
        self.can_go_prev
    }

    pub fn can_go_next(&self) -> bool {
        self.can_go_next
    }

    /// `None` when `page` is outside `[0, total_pages)`
    pub fn go_to_page(&self, page: usize) -> Option<PageLoad> {
        if page < self.total_pages {
            Some(PageLoad {
                page_index: page,
                page_size: self.page_size,
            })
        } else {
            None
        }
    }

    pub fn prev(&self) -> Option<PageLoad> {
        self.current_page
            .checked_sub(1)
            .and_then(|page| self.go_to_page(page))
    }

    pub fn next(&self) -> Option<PageLoad> {
        self.go_to_page(self.current_page + 1)
    }

    /// Reloads the current page index at the new size
    pub fn set_page_size(&mut self, page_size: usize) -> PageLoad {
        self.page_size = page_size;
        PageLoad {
            page_index: self.current_page,
            page_size,
        }
    }

    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.current_page + 1, self.total_pages)
    }

    fn update_controls(&mut self) {
        self.can_go_prev = self.current_page > 0;
        self.can_go_next = self.current_page + 1 < self.total_pages;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let pagination = Pagination::default();
        assert_eq!(pagination.current_page(), 0);
        assert_eq!(pagination.total_pages(), 1);
        assert_eq!(pagination.current_page_size(), 5);
        assert!(!pagination.can_go_prev());
        assert!(!pagination.can_go_next());
        assert_eq!(pagination.page_info(), "Page 1 of 1");
    }

    #[test]
    fn test_controls_follow_position() {
        let mut pagination = Pagination::default();
        for total in 1..6 {
            pagination.set_total_pages(total);
            for page in 0..total {
                pagination.set_current_page(page);
                assert_eq!(pagination.can_go_prev(), page > 0, "page {} of {}", page, total);
                assert_eq!(
                    pagination.can_go_next(),
                    page < total - 1,
                    "page {} of {}",
                    page,
                    total
                );
            }
        }
    }

    #[test]
    fn test_go_to_page_out_of_range() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(3);

        assert_eq!(pagination.go_to_page(3), None);
        assert_eq!(pagination.go_to_page(usize::MAX), None);
        assert_eq!(pagination.prev(), None);
        assert_eq!(
            pagination.go_to_page(2),
            Some(PageLoad {
                page_index: 2,
                page_size: 5
            })
        );

        pagination.set_current_page(2);
        assert_eq!(pagination.next(), None);
        assert_eq!(pagination.prev().map(|l| l.page_index), Some(1));
    }

    #[test]
    fn test_empty_result_disables_both() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(0);
        pagination.set_current_page(0);
        assert!(!pagination.can_go_prev());
        assert!(!pagination.can_go_next());
        assert_eq!(pagination.go_to_page(0), None);
        assert_eq!(pagination.page_info(), "Page 1 of 0");
    }

    #[test]
    fn test_page_size_change_keeps_page_index() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(4);
        pagination.set_current_page(3);

        let load = pagination.set_page_size(20);
        assert_eq!(
            load,
            PageLoad {
                page_index: 3,
                page_size: 20
            }
        );
        assert_eq!(pagination.current_page_size(), 20);
        assert_eq!(pagination.next(), None);
        assert_eq!(pagination.prev().map(|l| l.page_size), Some(20));
    }
}
