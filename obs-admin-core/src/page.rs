//! Paging value types shared by the grid and the REST services

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Query-string form (`asc` / `desc`)
    pub fn as_param(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Descending,
        }
    }

    /// `property,asc` as understood by the backend's `sort` parameter
    pub fn to_param(&self) -> String {
        format!("{},{}", self.property, self.direction.as_param())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
    pub sort: Sort,
}

impl PageRequest {
    pub fn of(page_index: usize, page_size: usize, sort: Sort) -> Self {
        Self {
            page_index,
            page_size,
            sort,
        }
    }

    pub fn unsorted(page_index: usize, page_size: usize) -> Self {
        Self::of(page_index, page_size, Sort::unsorted())
    }

    /// `page`, `size` and one `sort` pair per order, in that sequence
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page_index.to_string()),
            ("size", self.page_size.to_string()),
        ];
        pairs.extend(self.sort.orders().iter().map(|o| ("sort", o.to_param())));
        pairs
    }
}

/// One fetched page; immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_elements: u64,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page_index: request.page_index,
            page_size: request.page_size,
            total_elements,
            total_pages: total_pages(total_elements, request.page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn total_pages(total_elements: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_elements.div_ceil(page_size as u64) as usize
}

/// `{ "data": { "content": [...], "metadata": { "totalElements": n } } }`
#[derive(Debug, Deserialize)]
pub struct PageWrapper<T> {
    pub data: PageData<T>,
}

#[derive(Debug, Deserialize)]
pub struct PageData<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub metadata: PageMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub total_elements: u64,
}

impl<T> PageWrapper<T> {
    pub fn into_page(self, request: &PageRequest) -> Page<T> {
        Page::new(self.data.content, request, self.data.metadata.total_elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
        name: String,
    }

    #[test]
    fn test_total_pages() {
        let request = PageRequest::unsorted(0, 5);
        assert_eq!(Page::<u8>::new(vec![], &request, 0).total_pages, 0);
        assert_eq!(Page::<u8>::new(vec![], &request, 5).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], &request, 11).total_pages, 3);
        assert_eq!(
            Page::<u8>::new(vec![], &PageRequest::unsorted(0, 0), 11).total_pages,
            1
        );
    }

    #[test]
    fn test_unwrap_envelope() {
        let body = r#"{
            "data": {
                "content": [{"id": 1, "name": "Widget"}, {"id": 2, "name": "Gadget"}],
                "metadata": {"totalElements": 12, "page": 1}
            }
        }"#;
        let wrapper: PageWrapper<Row> = serde_json::from_str(body).unwrap();
        let page = wrapper.into_page(&PageRequest::unsorted(1, 5));

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[0].name, "Widget");
        assert_eq!(page.page_index, 1);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_missing_content_is_empty() {
        let body = r#"{"data": {"metadata": {"totalElements": 0}}}"#;
        let wrapper: PageWrapper<Row> = serde_json::from_str(body).unwrap();
        assert!(wrapper.into_page(&PageRequest::unsorted(0, 5)).is_empty());
    }

    #[test]
    fn test_query_pairs_keep_sort_order() {
        let request = PageRequest::of(
            2,
            20,
            Sort::by(vec![SortOrder::desc("price"), SortOrder::asc("name")]),
        );
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("size", "20".to_string()),
                ("sort", "price,desc".to_string()),
                ("sort", "name,asc".to_string()),
            ]
        );
    }
}
