//! Ready-made grids for the item and inventory listings, shared by every front end

use crate::api::{InventoryDetails, ItemDto};
use crate::datetime::format_date_short;
use crate::globals::{inventory_service, item_service};
use crate::grid::PaginatedGrid;

/// Items grid: ID, Name, Price, Created, Updated, Stock.
///
/// All but Stock are keyed by their backend property so sorting round-trips.
pub fn item_grid() -> PaginatedGrid<ItemDto> {
    let mut grid = PaginatedGrid::new(|request, filter| item_service()?.get_items(request, filter));
    add_item_columns(&mut grid);
    grid
}

pub fn add_item_columns(grid: &mut PaginatedGrid<ItemDto>) {
    grid.add_keyed_column("id", |i: &ItemDto| i.id.to_string(), "ID");
    grid.add_keyed_column("name", |i: &ItemDto| i.name.clone(), "Name");
    grid.add_keyed_column("price", |i: &ItemDto| i.price.to_string(), "Price");
    grid.add_keyed_column(
        "createdDate",
        |i: &ItemDto| format_date_short(i.created_date),
        "Created",
    );
    grid.add_keyed_column(
        "updatedDate",
        |i: &ItemDto| format_date_short(i.updated_date),
        "Updated",
    );
    grid.add_column(
        |i: &ItemDto| i.stock.map(|s| s.to_string()).unwrap_or_default(),
        "Stock",
    )
    .set_sortable(false);
}

/// Inventory grid: ID, Item Name, Quantity, Type, Created Date, Updated Date
pub fn inventory_grid() -> PaginatedGrid<InventoryDetails> {
    let mut grid = PaginatedGrid::new(|request, filter| {
        inventory_service()?.get_all_inventory(request, filter)
    });
    add_inventory_columns(&mut grid);
    grid
}

pub fn add_inventory_columns(grid: &mut PaginatedGrid<InventoryDetails>) {
    grid.add_column(|d: &InventoryDetails| d.id.to_string(), "ID");
    grid.add_column(|d: &InventoryDetails| d.item_name.clone(), "Item Name");
    grid.add_column(|d: &InventoryDetails| d.quantity.to_string(), "Quantity");
    grid.add_column(|d: &InventoryDetails| d.kind.describe().to_string(), "Type");
    grid.add_column(
        |d: &InventoryDetails| format_date_short(d.created_date),
        "Created Date",
    );
    grid.add_column(
        |d: &InventoryDetails| format_date_short(d.updated_date),
        "Updated Date",
    );
}
