pub mod client;
pub mod inventory;
pub mod items;
pub mod models;

pub use client::ApiClient;
pub use inventory::InventoryService;
pub use items::ItemService;
pub use models::{
    InventoryDetails, InventoryRequest, InventorySummary, InventoryType, ItemDto, ItemRequest,
};
