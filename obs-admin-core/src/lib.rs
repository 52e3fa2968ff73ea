pub mod api;
pub mod coerce;
pub mod config;
pub mod confirm_delete;
pub mod datetime;
pub mod edit_dialog;
pub mod error;
pub mod globals;
pub mod grid;
pub mod listing;
pub mod notification;
pub mod page;
pub mod pagination;
pub mod widget;

pub use api::{
    ApiClient, InventoryDetails, InventoryRequest, InventoryService, InventorySummary,
    InventoryType, ItemDto, ItemRequest, ItemService,
};
pub use coerce::coerce;
pub use config::{AdminConfig, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use confirm_delete::{ConfirmDeleteDialog, DeleteOutcome};
pub use datetime::format_date_short;
pub use edit_dialog::{EditDialog, SaveControl, SaveOutcome};
pub use error::AdminError;
pub use globals::{config, initialize, inventory_service, item_service};
pub use grid::{Column, Fetcher, GridSortOrder, PaginatedGrid, PendingLoad};
pub use listing::{add_inventory_columns, add_item_columns, inventory_grid, item_grid};
pub use notification::{Notification, NotificationPosition, NotificationVariant, Notifications};
pub use page::{Direction, Page, PageRequest, Sort, SortOrder};
pub use pagination::{PageLoad, Pagination};
pub use widget::{FieldValues, FormColumn, InputBinding, InputWidget};
