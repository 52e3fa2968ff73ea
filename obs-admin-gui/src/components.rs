//! Widgets shared by the management screens: the paged table, the form
//! dialogs and the notification stack.

use iced::widget::{
    button, center, checkbox, column, container, opaque, pick_list, row, scrollable, stack, text,
    text_input,
};
use iced::{Color, Element, Length};
use obs_admin_core::{
    AdminError, ConfirmDeleteDialog, Direction, EditDialog, FormColumn, InputWidget, Notification,
    NotificationVariant, Page, PaginatedGrid, PendingLoad,
};
use std::collections::BTreeMap;

const CELL_WIDTH: f32 = 150.0;
const ACTIONS_WIDTH: f32 = 150.0;

/// User interaction with a [`PaginatedGrid`] on screen
#[derive(Debug, Clone)]
pub enum GridEvent {
    Sort(String),
    CellClicked { row: usize, column: usize },
    Edit(usize),
    Delete(usize),
    PrevPage,
    NextPage,
    PageSize(usize),
}

/// Row-button press forwarded out of the grid's action column
#[derive(Debug, Clone)]
pub enum RowAction<T> {
    Edit(T),
    Delete(T),
}

/// Input into an open [`EditDialog`]
#[derive(Debug, Clone)]
pub enum DialogEvent {
    Input { field: String, text: String },
    Toggled { field: String, checked: bool },
    Save,
    Cancel,
}

/// Run blocking backend work off the UI thread
pub async fn run_blocking<R, F>(work: F) -> Result<R, String>
where
    F: FnOnce() -> Result<R, AdminError> + Send + 'static,
    R: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(|e| {
            log::warn!("Backend call failed: {}", e);
            e.user_message()
        }),
        Err(e) => Err(format!("Background task failed: {}", e)),
    }
}

pub async fn fetch_page<T: Send + 'static>(
    pending: PendingLoad<T>,
) -> (u64, Result<Page<T>, String>) {
    let ticket = pending.ticket;
    (ticket, run_blocking(move || pending.fetch()).await)
}

/// Clicking a header sorts ascending, clicking it again flips the direction
pub fn next_sort<T>(grid: &PaginatedGrid<T>, column_key: &str) -> Direction {
    match grid.sort_order().first() {
        Some(order) if order.column_key == column_key && order.direction == Direction::Ascending => {
            Direction::Descending
        }
        _ => Direction::Ascending,
    }
}

pub fn grid_table<'a, T, M>(
    grid: &'a PaginatedGrid<T>,
    on_event: impl Fn(GridEvent) -> M + Copy + 'a,
) -> Element<'a, M>
where
    M: Clone + 'a,
{
    let mut header = row![].spacing(4);
    for column in grid.columns() {
        let indicator = grid
            .sort_order()
            .iter()
            .find(|o| o.column_key == column.key())
            .map(|o| match o.direction {
                Direction::Ascending => " ▲",
                Direction::Descending => " ▼",
            })
            .unwrap_or("");
        let label = format!("{}{}", column.header().unwrap_or(""), indicator);
        let header_button = button(text(label).size(14))
            .style(button::text)
            .on_press_maybe(
                column
                    .is_sortable()
                    .then(|| on_event(GridEvent::Sort(column.key().to_string()))),
            );
        header = header.push(container(header_button).width(cell_width(column.is_auto_width())));
    }
    if let Some(actions) = grid.action_header() {
        header = header.push(container(text(actions).size(14)).width(Length::Fixed(ACTIONS_WIDTH)));
    }

    let mut body = column![].spacing(2);
    for (row_index, item) in grid.rows().iter().enumerate() {
        let mut cells = row![].spacing(4);
        for (column_index, column) in grid.columns().iter().enumerate() {
            let cell = button(text(column.render(item)).size(14))
                .style(button::text)
                .on_press(on_event(GridEvent::CellClicked {
                    row: row_index,
                    column: column_index,
                }));
            cells = cells.push(container(cell).width(cell_width(column.is_auto_width())));
        }
        if grid.has_action_column() {
            cells = cells.push(
                row![
                    button(text("Edit").size(13))
                        .style(button::secondary)
                        .on_press(on_event(GridEvent::Edit(row_index))),
                    button(text("Delete").size(13))
                        .style(button::danger)
                        .on_press(on_event(GridEvent::Delete(row_index))),
                ]
                .spacing(6)
                .width(Length::Fixed(ACTIONS_WIDTH)),
            );
        }
        body = body.push(cells);
    }

    let empty_note = if grid.rows().is_empty() {
        text(if grid.is_loading() { "Loading..." } else { "No data" })
            .size(14)
            .color(Color::from_rgb(0.5, 0.5, 0.5))
    } else {
        text("")
    };

    column![
        header,
        scrollable(body).height(Length::Fixed(320.0)),
        empty_note,
        pagination_controls(grid, on_event),
    ]
    .spacing(8)
    .into()
}

fn cell_width(auto_width: bool) -> Length {
    if auto_width {
        Length::Fixed(CELL_WIDTH)
    } else {
        Length::Shrink
    }
}

fn pagination_controls<'a, T, M>(
    grid: &'a PaginatedGrid<T>,
    on_event: impl Fn(GridEvent) -> M + Copy + 'a,
) -> Element<'a, M>
where
    M: Clone + 'a,
{
    let pagination = grid.pagination();
    row![
        button("Previous")
            .on_press_maybe(pagination.can_go_prev().then(|| on_event(GridEvent::PrevPage)))
            .padding(5),
        text(pagination.page_info()).size(14),
        button("Next")
            .on_press_maybe(pagination.can_go_next().then(|| on_event(GridEvent::NextPage)))
            .padding(5),
        text("Page size:").size(14),
        pick_list(
            pagination.page_sizes(),
            Some(pagination.current_page_size()),
            move |size| on_event(GridEvent::PageSize(size)),
        ),
    ]
    .spacing(10)
    .align_y(iced::alignment::Vertical::Center)
    .into()
}

/// An [`EditDialog`] together with the raw text typed into each input.
///
/// Number and date inputs hold no value while their text does not parse,
/// so the half-typed text lives here.
pub struct OpenEditDialog {
    pub dialog: EditDialog,
    drafts: BTreeMap<String, String>,
}

impl OpenEditDialog {
    pub fn new(mut dialog: EditDialog) -> Self {
        let drafts = dialog
            .bindings()
            .iter()
            .map(|b| (b.field.clone(), b.widget.display_text()))
            .collect();
        dialog.show();
        Self { dialog, drafts }
    }

    pub fn apply(&mut self, event: &DialogEvent) {
        match event {
            DialogEvent::Input { field, text } => {
                self.drafts.insert(field.clone(), text.clone());
                if let Some(widget) = self.dialog.widget_mut(field) {
                    if let Err(e) = widget.set_text(text) {
                        log::debug!("{} left empty: {}", field, e);
                    }
                }
            }
            DialogEvent::Toggled { field, checked } => {
                if let Some(widget) = self.dialog.widget_mut(field) {
                    widget.set_checked(*checked);
                }
            }
            DialogEvent::Save | DialogEvent::Cancel => {}
        }
    }

    pub fn view<'a, M>(&'a self, on_event: impl Fn(DialogEvent) -> M + Copy + 'a) -> Element<'a, M>
    where
        M: Clone + 'a,
    {
        let left = self.form_column(FormColumn::Left, on_event);
        let right = self.form_column(FormColumn::Right, on_event);
        let save_enabled = self.dialog.save_control().is_enabled();

        modal_card(
            column![
                text(self.dialog.title()).size(20),
                row![left, right].spacing(20),
                row![
                    button("Save")
                        .style(button::primary)
                        .on_press_maybe(save_enabled.then(|| on_event(DialogEvent::Save))),
                    button("Cancel")
                        .style(button::secondary)
                        .on_press(on_event(DialogEvent::Cancel)),
                ]
                .spacing(10),
            ]
            .spacing(16)
            .into(),
        )
    }

    fn form_column<'a, M>(
        &'a self,
        side: FormColumn,
        on_event: impl Fn(DialogEvent) -> M + Copy + 'a,
    ) -> Element<'a, M>
    where
        M: Clone + 'a,
    {
        let mut fields = column![].spacing(10).width(Length::Fixed(240.0));
        for binding in self.dialog.column(side) {
            let field = binding.field.clone();
            let input: Element<'a, M> = match &binding.widget {
                InputWidget::Checkbox { label, checked } => checkbox(label.as_str(), *checked)
                    .on_toggle(move |checked| {
                        on_event(DialogEvent::Toggled {
                            field: field.clone(),
                            checked,
                        })
                    })
                    .into(),
                InputWidget::ComboBox { label, items, value } => column![
                    text(label.as_str()).size(14),
                    pick_list(items.as_slice(), value.clone(), move |text| {
                        on_event(DialogEvent::Input {
                            field: field.clone(),
                            text,
                        })
                    }),
                ]
                .spacing(4)
                .into(),
                InputWidget::Unsupported { label, kind } => {
                    text(format!("{} ({} not editable here)", label, kind))
                        .size(14)
                        .into()
                }
                widget => {
                    let draft = self
                        .drafts
                        .get(&binding.field)
                        .cloned()
                        .unwrap_or_else(|| widget.display_text());
                    column![
                        text(widget.label()).size(14),
                        text_input(widget.label(), &draft).on_input(move |text| {
                            on_event(DialogEvent::Input {
                                field: field.clone(),
                                text,
                            })
                        }),
                    ]
                    .spacing(4)
                    .into()
                }
            };
            fields = fields.push(input);
        }
        fields.into()
    }
}

pub fn confirm_delete_view<'a, T, M>(
    dialog: &'a ConfirmDeleteDialog<T>,
    on_confirm: M,
    on_cancel: M,
) -> Element<'a, M>
where
    M: Clone + 'a,
{
    modal_card(
        column![
            text(dialog.header_title()).size(20),
            text(dialog.prompt().unwrap_or_default()).size(15),
            row![
                button("Delete").style(button::danger).on_press(on_confirm),
                button("Cancel")
                    .style(button::secondary)
                    .on_press(on_cancel),
            ]
            .spacing(10),
        ]
        .spacing(16)
        .into(),
    )
}

fn modal_card<'a, M: 'a>(content: Element<'a, M>) -> Element<'a, M> {
    container(content)
        .padding(20)
        .width(Length::Shrink)
        .style(|_theme| container::Style {
            background: Some(Color::WHITE.into()),
            border: iced::Border {
                color: Color::from_rgb(0.5, 0.5, 0.5),
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        })
        .into()
}

/// Lay `overlay` over `base`, blocking input to everything underneath
pub fn with_modal<'a, M: Clone + 'a>(
    base: Element<'a, M>,
    overlay: Option<Element<'a, M>>,
) -> Element<'a, M> {
    match overlay {
        Some(overlay) => stack![
            base,
            opaque(center(overlay).style(|_theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.4).into()),
                ..Default::default()
            }))
        ]
        .into(),
        None => base,
    }
}

pub fn notification_stack<'a, M: 'a>(notifications: &[Notification]) -> Element<'a, M> {
    let mut toasts = column![].spacing(6);
    for notification in notifications {
        let background = match notification.variant {
            NotificationVariant::Error => Color::from_rgb(0.85, 0.25, 0.25),
            NotificationVariant::Success => Color::from_rgb(0.2, 0.6, 0.35),
            NotificationVariant::Info => Color::from_rgb(0.25, 0.35, 0.55),
        };
        toasts = toasts.push(
            container(text(notification.message.clone()).size(14).color(Color::WHITE))
                .padding(10)
                .style(move |_theme| container::Style {
                    background: Some(background.into()),
                    border: iced::Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
        );
    }
    toasts.into()
}
