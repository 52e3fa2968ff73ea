use crate::components::{GridEvent, fetch_page, grid_table, next_sort, run_blocking};
use iced::widget::{button, column, container, pick_list, row, text, text_input};
use iced::{Element, Length, Task};
use obs_admin_core::{
    GridSortOrder, InventoryDetails, InventoryRequest, InventorySummary, InventoryType, ItemDto,
    Notification, Notifications, Page, PageRequest, PaginatedGrid, PendingLoad,
    inventory_grid, inventory_service, item_service,
};

pub const FILL_REQUIRED_FIELDS: &str = "Please fill all required fields";
pub const INVENTORY_SAVED: &str = "Inventory saved";
pub const EDIT_INVENTORY: &str = "Edit Inventory";
pub const DELETE_INVENTORY: &str = "Delete Inventory";

/// Grid column that opens the item's summary when clicked
const ITEM_NAME_COLUMN: usize = 1;
/// How many items the record form offers to choose from
const ITEM_CHOICES: usize = 100;
const TYPE_CHOICES: &[InventoryType] = &InventoryType::ALL;

#[derive(Debug, Clone)]
pub enum InventoryMessage {
    Grid(GridEvent),
    PageLoaded(u64, Result<Page<InventoryDetails>, String>),
    ItemChoicesLoaded(Result<Page<ItemDto>, String>),
    ItemSelected(ItemDto),
    QuantityChanged(String),
    KindSelected(InventoryType),
    Save,
    Saved(Result<(), String>),
    SummaryItemChanged(String),
    SummaryLoaded(String, Result<InventorySummary, String>),
}

pub struct InventoryView {
    grid: PaginatedGrid<InventoryDetails>,
    item_choices: Vec<ItemDto>,
    selected_item: Option<ItemDto>,
    quantity: String,
    kind: InventoryType,
    is_saving: bool,
    summary_item_id: String,
    summary: Option<InventorySummary>,
    notifications: Notifications,
}

impl InventoryView {
    pub fn new(notifications: Notifications) -> Self {
        let mut grid = inventory_grid();
        let on_edit = notifications.clone();
        let on_delete = notifications.clone();
        grid.add_action_column(
            move |_: &InventoryDetails| on_edit.show(Notification::info(EDIT_INVENTORY)),
            move |_: &InventoryDetails| on_delete.show(Notification::info(DELETE_INVENTORY)),
        );

        Self {
            grid,
            item_choices: Vec::new(),
            selected_item: None,
            quantity: String::new(),
            kind: InventoryType::default(),
            is_saving: false,
            summary_item_id: String::new(),
            summary: None,
            notifications,
        }
    }

    /// First grid page plus the item picker's choices
    pub fn initial_load(&mut self) -> Task<InventoryMessage> {
        let choices = Task::perform(
            run_blocking(|| item_service()?.get_items(&PageRequest::unsorted(0, ITEM_CHOICES), "")),
            InventoryMessage::ItemChoicesLoaded,
        );
        Task::batch([self.load_first_page(), choices])
    }

    fn load_first_page(&mut self) -> Task<InventoryMessage> {
        let size = self.grid.pagination().current_page_size();
        load(self.grid.begin_load(0, size))
    }

    pub fn update(&mut self, message: InventoryMessage) -> Task<InventoryMessage> {
        match message {
            InventoryMessage::Grid(event) => return self.on_grid_event(event),
            InventoryMessage::PageLoaded(ticket, Ok(page)) => {
                self.grid.finish_load(ticket, page);
            }
            InventoryMessage::PageLoaded(ticket, Err(e)) => {
                self.grid.abandon_load(ticket);
                self.notifications.show(Notification::error(e));
            }
            InventoryMessage::ItemChoicesLoaded(Ok(page)) => self.item_choices = page.content,
            InventoryMessage::ItemChoicesLoaded(Err(e)) => {
                self.notifications.show(Notification::error(e));
            }
            InventoryMessage::ItemSelected(item) => self.selected_item = Some(item),
            InventoryMessage::QuantityChanged(quantity) => self.quantity = quantity,
            InventoryMessage::KindSelected(kind) => self.kind = kind,
            InventoryMessage::Save => return self.save(),
            InventoryMessage::Saved(result) => {
                self.is_saving = false;
                match result {
                    Ok(()) => {
                        self.notifications.show(Notification::success(INVENTORY_SAVED));
                        self.selected_item = None;
                        self.quantity.clear();
                        self.kind = InventoryType::default();
                        return self.load_first_page();
                    }
                    Err(e) => self.notifications.show(Notification::error(e)),
                }
            }
            InventoryMessage::SummaryItemChanged(item_id) => return self.show_summary(item_id),
            InventoryMessage::SummaryLoaded(item_id, result) => {
                // Only the summary for the id currently typed is shown
                if item_id == self.summary_item_id.trim() {
                    match result {
                        Ok(summary) => self.summary = Some(summary),
                        Err(e) => {
                            self.notifications.show(Notification::error(e));
                            self.summary = None;
                        }
                    }
                }
            }
        }
        Task::none()
    }

    fn on_grid_event(&mut self, event: GridEvent) -> Task<InventoryMessage> {
        let pending = match event {
            GridEvent::Sort(key) => {
                let direction = next_sort(&self.grid, &key);
                self.grid
                    .set_sort_order_quiet(vec![GridSortOrder::new(key, direction)]);
                let pagination = self.grid.pagination();
                let (page, size) = (pagination.current_page(), pagination.current_page_size());
                Some(self.grid.begin_load(page, size))
            }
            GridEvent::PrevPage => self
                .grid
                .pagination()
                .prev()
                .map(|load| self.grid.begin_page_load(load)),
            GridEvent::NextPage => self
                .grid
                .pagination()
                .next()
                .map(|load| self.grid.begin_page_load(load)),
            GridEvent::PageSize(size) => Some(self.grid.begin_page_size_change(size)),
            GridEvent::Edit(row) => {
                self.grid.click_edit(row);
                None
            }
            GridEvent::Delete(row) => {
                self.grid.click_delete(row);
                None
            }
            GridEvent::CellClicked { row, column } if column == ITEM_NAME_COLUMN => {
                if let Some(item_id) = self.grid.row(row).map(|d| d.item_id.to_string()) {
                    return self.show_summary(item_id);
                }
                None
            }
            GridEvent::CellClicked { .. } => None,
        };
        pending.map(load).unwrap_or_else(Task::none)
    }

    /// Filter the grid to one item and fetch its summary; a blank id shows everything
    fn show_summary(&mut self, item_id: String) -> Task<InventoryMessage> {
        self.summary_item_id = item_id;
        let trimmed = self.summary_item_id.trim().to_string();
        self.grid.set_filter_text(Some(&trimmed));
        let reload = self.load_first_page();

        if trimmed.is_empty() {
            self.summary = None;
            return reload;
        }
        let lookup_id = trimmed.clone();
        let summary = Task::perform(
            run_blocking(move || inventory_service()?.get_summary_by_item_id(&lookup_id)),
            move |result| InventoryMessage::SummaryLoaded(trimmed.clone(), result),
        );
        Task::batch([reload, summary])
    }

    fn save(&mut self) -> Task<InventoryMessage> {
        let quantity = self.quantity.trim().parse::<i64>().ok();
        let request = match (&self.selected_item, quantity) {
            (Some(item), Some(quantity)) if quantity > 0 => InventoryRequest {
                item_id: item.id,
                quantity,
                kind: self.kind,
            },
            _ => {
                self.notifications
                    .show(Notification::error(FILL_REQUIRED_FIELDS));
                return Task::none();
            }
        };

        self.is_saving = true;
        Task::perform(
            run_blocking(move || inventory_service()?.save_inventory(&request)),
            InventoryMessage::Saved,
        )
    }

    pub fn view(&self) -> Element<InventoryMessage> {
        let record_form = row![
            pick_list(
                self.item_choices.as_slice(),
                self.selected_item.clone(),
                InventoryMessage::ItemSelected,
            )
            .placeholder("Select Item")
            .width(Length::Fixed(240.0)),
            text_input("Quantity", &self.quantity)
                .on_input(InventoryMessage::QuantityChanged)
                .width(Length::Fixed(120.0)),
            pick_list(
                TYPE_CHOICES,
                Some(self.kind),
                InventoryMessage::KindSelected,
            ),
            button(if self.is_saving { "Saving..." } else { "Save" })
                .on_press_maybe((!self.is_saving).then_some(InventoryMessage::Save)),
        ]
        .spacing(10);

        column![
            text("Inventory Management").size(24),
            text("Record Inventory").size(16),
            record_form,
            text("Inventory Summary").size(16),
            text_input("Item ID", &self.summary_item_id)
                .on_input(InventoryMessage::SummaryItemChanged)
                .width(Length::Fixed(200.0)),
            self.summary_view(),
            grid_table(&self.grid, InventoryMessage::Grid),
        ]
        .spacing(14)
        .into()
    }

    fn summary_view(&self) -> Element<InventoryMessage> {
        let Some(summary) = &self.summary else {
            return text("Enter an item id to see its summary")
                .size(14)
                .color(iced::Color::from_rgb(0.5, 0.5, 0.5))
                .into();
        };
        let line = |label: &str, value: &str| {
            row![
                text(format!("{}:", label)).size(14).width(Length::Fixed(160.0)),
                text(value.to_string()).size(14),
            ]
        };
        container(
            column![
                line("Item ID", &summary.item_id),
                line("Item Name", &summary.item_name),
                line("Total Top-Up", &summary.total_top_up),
                line("Total Withdraw", &summary.total_withdraw),
                line("Remaining Stock", &summary.remaining_stock),
                line("Top-Up Count", &summary.top_up_count),
                line("Withdraw Count", &summary.withdraw_count),
            ]
            .spacing(4),
        )
        .padding(10)
        .into()
    }
}

fn load(pending: PendingLoad<InventoryDetails>) -> Task<InventoryMessage> {
    Task::perform(fetch_page(pending), |(ticket, result)| {
        InventoryMessage::PageLoaded(ticket, result)
    })
}
