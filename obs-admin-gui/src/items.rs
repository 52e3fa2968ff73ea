use crate::components::{
    DialogEvent, GridEvent, OpenEditDialog, RowAction, confirm_delete_view, fetch_page,
    grid_table, next_sort, run_blocking, with_modal,
};
use iced::widget::{button, column, row, text, text_input};
use iced::{Element, Length, Task};
use obs_admin_core::{
    ConfirmDeleteDialog, DeleteOutcome, EditDialog, GridSortOrder, InputWidget, ItemDto,
    Notification, NotificationPosition, Notifications, Page, PaginatedGrid, PendingLoad, SaveOutcome, item_grid,
    item_service,
};
use serde::Deserialize;
use std::sync::mpsc::{Receiver, channel};

pub const FILL_ALL_FIELDS: &str = "Please fill all fields correctly";
pub const ITEM_ADDED: &str = "Item added!";
pub const FAILED_TO_ADD_ITEM: &str = "Failed to add item";
pub const FILTER_PROMPT: &str = "Filter by Name or ID";

#[derive(Debug, Clone)]
pub enum ItemsMessage {
    FilterChanged(String),
    Grid(GridEvent),
    PageLoaded(u64, Result<Page<ItemDto>, String>),
    NameChanged(String),
    PriceChanged(String),
    AddItem,
    ItemAdded(Result<(), String>),
    Dialog(DialogEvent),
    ConfirmDelete,
    CancelDelete,
}

/// Values read back from the edit dialog
#[derive(Debug, Deserialize)]
struct ItemUpdate {
    name: String,
    price: f64,
}

pub struct ItemsView {
    grid: PaginatedGrid<ItemDto>,
    filter: String,
    new_name: String,
    new_price: String,
    is_adding: bool,
    edit_dialog: Option<OpenEditDialog>,
    delete_dialog: ConfirmDeleteDialog<ItemDto>,
    row_actions: Receiver<RowAction<ItemDto>>,
    notifications: Notifications,
}

impl ItemsView {
    pub fn new(notifications: Notifications) -> Self {
        let mut grid = item_grid();

        let (sender, row_actions) = channel();
        let delete_sender = sender.clone();
        grid.add_action_column(
            move |item: &ItemDto| {
                let _ = sender.send(RowAction::Edit(item.clone()));
            },
            move |item: &ItemDto| {
                let _ = delete_sender.send(RowAction::Delete(item.clone()));
            },
        );

        Self {
            grid,
            filter: String::new(),
            new_name: String::new(),
            new_price: String::new(),
            is_adding: false,
            edit_dialog: None,
            delete_dialog: ConfirmDeleteDialog::new(notifications.clone()),
            row_actions,
            notifications,
        }
    }

    pub fn load_first_page(&mut self) -> Task<ItemsMessage> {
        let size = self.grid.pagination().current_page_size();
        let pending = self.grid.begin_load(0, size);
        load(pending)
    }

    pub fn update(&mut self, message: ItemsMessage) -> Task<ItemsMessage> {
        match message {
            ItemsMessage::FilterChanged(filter) => {
                self.grid.set_filter_text(Some(&filter));
                self.filter = filter;
                return self.load_first_page();
            }
            ItemsMessage::Grid(event) => return self.on_grid_event(event),
            ItemsMessage::PageLoaded(ticket, Ok(page)) => {
                self.grid.finish_load(ticket, page);
            }
            ItemsMessage::PageLoaded(ticket, Err(e)) => {
                self.grid.abandon_load(ticket);
                self.notifications.show(Notification::error(e));
            }
            ItemsMessage::NameChanged(name) => self.new_name = name,
            ItemsMessage::PriceChanged(price) => self.new_price = price,
            ItemsMessage::AddItem => return self.add_item(),
            ItemsMessage::ItemAdded(result) => {
                self.is_adding = false;
                match result {
                    Ok(()) => {
                        self.notifications.show(Notification::info(ITEM_ADDED));
                        self.new_name.clear();
                        self.new_price.clear();
                        return self.load_first_page();
                    }
                    Err(e) => {
                        log::warn!("{}: {}", FAILED_TO_ADD_ITEM, e);
                        self.notifications.show(
                            Notification::error(FAILED_TO_ADD_ITEM).at(NotificationPosition::Middle),
                        );
                    }
                }
            }
            ItemsMessage::Dialog(event) => return self.on_dialog_event(event),
            ItemsMessage::ConfirmDelete => {
                if self.delete_dialog.confirm() == DeleteOutcome::Deleted {
                    return self.load_first_page();
                }
            }
            ItemsMessage::CancelDelete => self.delete_dialog.cancel(),
        }
        Task::none()
    }

    fn on_grid_event(&mut self, event: GridEvent) -> Task<ItemsMessage> {
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
            GridEvent::CellClicked { .. } => None,
        };
        self.handle_row_actions();
        pending.map(load).unwrap_or_else(Task::none)
    }

    fn handle_row_actions(&mut self) {
        while let Ok(action) = self.row_actions.try_recv() {
            match action {
                RowAction::Edit(item) => self.open_edit_dialog(item),
                RowAction::Delete(item) => self.delete_dialog.show(
                    item,
                    |i| i.name.clone(),
                    |i| item_service()?.delete_item(i.id),
                ),
            }
        }
    }

    fn open_edit_dialog(&mut self, item: ItemDto) {
        let mut dialog = EditDialog::new("Edit Item", self.notifications.clone());
        dialog.add_left_component("name", InputWidget::text_field("Name", &item.name));
        dialog.add_right_component("price", InputWidget::number_field("Price", Some(item.price)));

        let id = item.id;
        dialog.add_save_listener(move |update: ItemUpdate| {
            item_service()?.update_item(id, &update.name, update.price as i64)
        });
        self.edit_dialog = Some(OpenEditDialog::new(dialog));
    }

    fn on_dialog_event(&mut self, event: DialogEvent) -> Task<ItemsMessage> {
        let Some(open) = self.edit_dialog.as_mut() else {
            return Task::none();
        };
        match event {
            DialogEvent::Save => {
                if open.dialog.save() == SaveOutcome::Saved {
                    self.edit_dialog = None;
                    return self.load_first_page();
                }
            }
            DialogEvent::Cancel => self.edit_dialog = None,
            other => open.apply(&other),
        }
        Task::none()
    }

    fn add_item(&mut self) -> Task<ItemsMessage> {
        let name = self.new_name.trim().to_string();
        let price = self.new_price.trim().parse::<f64>().ok();
        let price = match price {
            Some(price) if !name.is_empty() && price >= 0.0 => price as i64,
            _ => {
                self.notifications
                    .show(Notification::error(FILL_ALL_FIELDS).at(NotificationPosition::Middle));
                return Task::none();
            }
        };

        self.is_adding = true;
        Task::perform(
            run_blocking(move || item_service()?.create_item(&name, price)),
            ItemsMessage::ItemAdded,
        )
    }

    pub fn view(&self) -> Element<ItemsMessage> {
        let add_form = row![
            text_input("Name", &self.new_name)
                .on_input(ItemsMessage::NameChanged)
                .width(Length::Fixed(220.0)),
            text_input("Price", &self.new_price)
                .on_input(ItemsMessage::PriceChanged)
                .on_submit(ItemsMessage::AddItem)
                .width(Length::Fixed(120.0)),
            button(if self.is_adding { "Adding..." } else { "Add Item" })
                .on_press_maybe((!self.is_adding).then_some(ItemsMessage::AddItem)),
        ]
        .spacing(10);

        let content = column![
            text("Item Management").size(24),
            text("Add New Item").size(16),
            add_form,
            text(FILTER_PROMPT).size(14),
            text_input(FILTER_PROMPT, &self.filter)
                .on_input(ItemsMessage::FilterChanged)
                .width(Length::Fixed(350.0)),
            grid_table(&self.grid, ItemsMessage::Grid),
        ]
        .spacing(14)
        .into();

        let overlay = if let Some(open) = &self.edit_dialog {
            Some(open.view(ItemsMessage::Dialog))
        } else if self.delete_dialog.is_open() {
            Some(confirm_delete_view(
                &self.delete_dialog,
                ItemsMessage::ConfirmDelete,
                ItemsMessage::CancelDelete,
            ))
        } else {
            None
        };
        with_modal(content, overlay)
    }
}

fn load(pending: PendingLoad<ItemDto>) -> Task<ItemsMessage> {
    Task::perform(fetch_page(pending), |(ticket, result)| {
        ItemsMessage::PageLoaded(ticket, result)
    })
}
