//! Table bound to a remotely paged listing
//!
//! A [`PaginatedGrid`] owns the rows of the page currently on screen. Every
//! page load replaces that buffer wholesale with what the fetcher returned;
//! rows are never patched locally, so after an add/edit/delete the owner
//! simply reloads.

use crate::error::AdminError;
use crate::page::{Direction, Page, PageRequest, Sort, SortOrder};
use crate::pagination::{PageLoad, Pagination};
use log::{debug, warn};
use std::sync::Arc;

/// `(request, filter) -> page`, supplied by each view
pub type Fetcher<T> = Arc<dyn Fn(&PageRequest, &str) -> Result<Page<T>, AdminError> + Send + Sync>;

pub const ACTIONS_HEADER: &str = "Actions";

type CellValue<T> = Box<dyn Fn(&T) -> String>;
type RowHandler<T> = Box<dyn FnMut(&T)>;

pub struct Column<T> {
    key: String,
    header: Option<String>,
    sortable: bool,
    auto_width: bool,
    value: CellValue<T>,
}

impl<T> Column<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_auto_width(&self) -> bool {
        self.auto_width
    }

    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    pub fn set_sortable(&mut self, sortable: bool) -> &mut Self {
        self.sortable = sortable;
        self
    }

    pub fn set_auto_width(&mut self, auto_width: bool) -> &mut Self {
        self.auto_width = auto_width;
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = key.into();
        self
    }

    pub fn render(&self, item: &T) -> String {
        (self.value)(item)
    }
}

struct ActionColumn<T> {
    on_edit: RowHandler<T>,
    on_delete: RowHandler<T>,
}

/// Client-side sort state for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSortOrder {
    pub column_key: String,
    pub direction: Direction,
}

impl GridSortOrder {
    pub fn new(column_key: impl Into<String>, direction: Direction) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }
}

/// A fetch that has been requested but not yet applied.
///
/// Only the most recently issued ticket is applied by
/// [`PaginatedGrid::finish_load`]; older ones are dropped.
pub struct PendingLoad<T> {
    pub ticket: u64,
    pub request: PageRequest,
    pub filter: String,
    fetcher: Fetcher<T>,
}

impl<T> PendingLoad<T> {
    /// Run the fetcher; blocks for the whole remote round trip
    pub fn fetch(&self) -> Result<Page<T>, AdminError> {
        (self.fetcher)(&self.request, &self.filter)
    }
}

impl<T> std::fmt::Debug for PendingLoad<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad")
            .field("ticket", &self.ticket)
            .field("request", &self.request)
            .field("filter", &self.filter)
            .finish()
    }
}

pub struct PaginatedGrid<T> {
    fetcher: Fetcher<T>,
    columns: Vec<Column<T>>,
    actions: Option<ActionColumn<T>>,
    rows: Vec<T>,
    pagination: Pagination,
    sort_order: Vec<GridSortOrder>,
    current_filter: String,
    next_ticket: u64,
    // (ticket, page index) of the load whose result we are waiting for
    in_flight: Option<(u64, usize)>,
}

impl<T> PaginatedGrid<T> {
    pub fn new<F>(fetcher: F) -> Self
    where
        F: Fn(&PageRequest, &str) -> Result<Page<T>, AdminError> + Send + Sync + 'static,
    {
        Self::with_pagination(fetcher, Pagination::default())
    }

    pub fn with_pagination<F>(fetcher: F, pagination: Pagination) -> Self
    where
        F: Fn(&PageRequest, &str) -> Result<Page<T>, AdminError> + Send + Sync + 'static,
    {
        Self {
            fetcher: Arc::new(fetcher),
            columns: Vec::new(),
            actions: None,
            rows: Vec::new(),
            pagination,
            sort_order: Vec::new(),
            current_filter: String::new(),
            next_ticket: 0,
            in_flight: None,
        }
    }

    // ---- columns ----

    /// Sortable, auto-width column with a header and a generated key
    pub fn add_column<F>(&mut self, value: F, header: &str) -> &mut Column<T>
    where
        F: Fn(&T) -> String + 'static,
    {
        let key = self.next_column_key();
        self.push_column(key, Some(header.to_string()), true, value)
    }

    pub fn add_unlabeled_column<F>(&mut self, value: F) -> &mut Column<T>
    where
        F: Fn(&T) -> String + 'static,
    {
        let key = self.next_column_key();
        self.push_column(key, None, false, value)
    }

    /// Column whose key is a backend property name, so sorting on it round-trips
    pub fn add_keyed_column<F>(&mut self, key: &str, value: F, header: &str) -> &mut Column<T>
    where
        F: Fn(&T) -> String + 'static,
    {
        self.push_column(key.to_string(), Some(header.to_string()), true, value)
    }

    fn push_column<F>(
        &mut self,
        key: String,
        header: Option<String>,
        auto_width: bool,
        value: F,
    ) -> &mut Column<T>
    where
        F: Fn(&T) -> String + 'static,
    {
        self.columns.push(Column {
            key,
            header,
            sortable: true,
            auto_width,
            value: Box::new(value),
        });
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    fn next_column_key(&self) -> String {
        format!("col_{}", self.column_count())
    }

    /// Data columns plus the action column, if any
    pub fn column_count(&self) -> usize {
        self.columns.len() + usize::from(self.actions.is_some())
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn add_action_column<E, D>(&mut self, on_edit: E, on_delete: D)
    where
        E: FnMut(&T) + 'static,
        D: FnMut(&T) + 'static,
    {
        self.actions = Some(ActionColumn {
            on_edit: Box::new(on_edit),
            on_delete: Box::new(on_delete),
        });
    }

    pub fn has_action_column(&self) -> bool {
        self.actions.is_some()
    }

    /// Header over the Edit/Delete buttons, when the grid has them
    pub fn action_header(&self) -> Option<&'static str> {
        self.actions.as_ref().map(|_| ACTIONS_HEADER)
    }

    /// Edit button of row `row`; false when there is no such row or no action column
    pub fn click_edit(&mut self, row: usize) -> bool {
        match (self.actions.as_mut(), self.rows.get(row)) {
            (Some(actions), Some(item)) => {
                (actions.on_edit)(item);
                true
            }
            _ => false,
        }
    }

    pub fn click_delete(&mut self, row: usize) -> bool {
        match (self.actions.as_mut(), self.rows.get(row)) {
            (Some(actions), Some(item)) => {
                (actions.on_delete)(item);
                true
            }
            _ => false,
        }
    }

    // ---- rows ----

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        let item = self.rows.get(row)?;
        self.columns.get(column).map(|c| c.render(item))
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn filter(&self) -> &str {
        &self.current_filter
    }

    pub fn sort_order(&self) -> &[GridSortOrder] {
        &self.sort_order
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    // ---- loading ----

    /// Current column sort translated into a request; unsorted when no column is sorted
    pub fn page_request(&self, page_index: usize, page_size: usize) -> PageRequest {
        let sort = if self.sort_order.is_empty() {
            Sort::unsorted()
        } else {
            Sort::by(
                self.sort_order
                    .iter()
                    .map(|o| match o.direction {
                        Direction::Ascending => SortOrder::asc(&o.column_key),
                        Direction::Descending => SortOrder::desc(&o.column_key),
                    })
                    .collect(),
            )
        };
        PageRequest::of(page_index, page_size, sort)
    }

    pub fn begin_load(&mut self, page_index: usize, page_size: usize) -> PendingLoad<T> {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some((ticket, page_index));

        let request = self.page_request(page_index, page_size);
        debug!(
            "loading page {} (size {}, filter {:?}, sort {:?})",
            page_index, page_size, self.current_filter, request.sort
        );
        PendingLoad {
            ticket,
            request,
            filter: self.current_filter.clone(),
            fetcher: Arc::clone(&self.fetcher),
        }
    }

    pub fn begin_page_load(&mut self, load: PageLoad) -> PendingLoad<T> {
        self.begin_load(load.page_index, load.page_size)
    }

    /// Apply a fetched page; returns false (and changes nothing) for a stale ticket
    pub fn finish_load(&mut self, ticket: u64, page: Page<T>) -> bool {
        let page_index = match self.in_flight {
            Some((current, page_index)) if current == ticket => page_index,
            _ => {
                debug!("dropping stale page load {}", ticket);
                return false;
            }
        };
        self.in_flight = None;

        self.rows = page.content;
        self.pagination.set_total_pages(page.total_pages);
        self.pagination.set_current_page(page_index);
        true
    }

    /// Forget a load that failed so the grid is no longer marked as loading
    pub fn abandon_load(&mut self, ticket: u64) {
        if matches!(self.in_flight, Some((current, _)) if current == ticket) {
            self.in_flight = None;
        }
    }

    /// Fetch and show `page_index`, blocking until the fetcher returns.
    /// Fetch errors are returned untouched.
    pub fn load_page_sized(&mut self, page_index: usize, page_size: usize) -> Result<(), AdminError> {
        let pending = self.begin_load(page_index, page_size);
        match pending.fetch() {
            Ok(page) => {
                self.finish_load(pending.ticket, page);
                Ok(())
            }
            Err(e) => {
                self.abandon_load(pending.ticket);
                Err(e)
            }
        }
    }

    pub fn load_page(&mut self, page_index: usize) -> Result<(), AdminError> {
        self.load_page_sized(page_index, self.pagination.current_page_size())
    }

    pub fn reload(&mut self) -> Result<(), AdminError> {
        self.load_page(self.pagination.current_page())
    }

    /// Store the filter (`None` means empty) without loading
    pub fn set_filter_text(&mut self, filter: Option<&str>) {
        self.current_filter = filter.unwrap_or_default().to_string();
    }

    pub fn set_filter(&mut self, filter: Option<&str>) -> Result<(), AdminError> {
        self.set_filter_text(filter);
        self.load_page(0)
    }

    /// Store the sort order without loading; unknown or unsortable columns are skipped
    pub fn set_sort_order_quiet(&mut self, order: Vec<GridSortOrder>) {
        self.sort_order = order
            .into_iter()
            .filter(|o| match self.column(&o.column_key) {
                Some(column) if column.sortable => true,
                _ => {
                    warn!("ignoring sort on unknown or unsortable column {}", o.column_key);
                    false
                }
            })
            .collect();
    }

    /// Change the sort and reload the current page with it
    pub fn set_sort_order(&mut self, order: Vec<GridSortOrder>) -> Result<(), AdminError> {
        self.set_sort_order_quiet(order);
        self.reload()
    }

    pub fn sort_by(&mut self, column_key: &str, direction: Direction) -> Result<(), AdminError> {
        self.set_sort_order(vec![GridSortOrder::new(column_key, direction)])
    }

    // ---- pagination controls ----

    /// Returns Ok(false) when `page` is out of range and nothing was loaded
    pub fn go_to_page(&mut self, page: usize) -> Result<bool, AdminError> {
        match self.pagination.go_to_page(page) {
            Some(load) => self.load_page_sized(load.page_index, load.page_size).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn prev(&mut self) -> Result<bool, AdminError> {
        match self.pagination.prev() {
            Some(load) => self.load_page_sized(load.page_index, load.page_size).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn next(&mut self) -> Result<bool, AdminError> {
        match self.pagination.next() {
            Some(load) => self.load_page_sized(load.page_index, load.page_size).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), AdminError> {
        let load = self.pagination.set_page_size(page_size);
        self.load_page_sized(load.page_index, load.page_size)
    }

    /// Page-size change for async callers: updates the selector, returns the load to run
    pub fn begin_page_size_change(&mut self, page_size: usize) -> PendingLoad<T> {
        let load = self.pagination.set_page_size(page_size);
        self.begin_page_load(load)
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod grid_tests;
