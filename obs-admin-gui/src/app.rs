use crate::components::notification_stack;
use crate::inventory::{InventoryMessage, InventoryView};
use crate::items::{ItemsMessage, ItemsView};
use iced::widget::{button, column, container, row, stack};
use iced::{Element, Length, Task};
use obs_admin_core::{Notification, NotificationPosition, Notifications};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Items,
    Inventory,
}

#[derive(Debug, Clone)]
pub enum Message {
    ShowScreen(Screen),
    Items(ItemsMessage),
    Inventory(InventoryMessage),
    ExpireNotifications,
}

struct Toast {
    notification: Notification,
    shown_at: Instant,
}

pub struct AppState {
    screen: Screen,
    items: ItemsView,
    inventory: InventoryView,
    notifications: Notifications,
    toasts: Vec<Toast>,
}

impl AppState {
    pub fn new() -> Self {
        let notifications = Notifications::new();
        Self {
            screen: Screen::Items,
            items: ItemsView::new(notifications.clone()),
            inventory: InventoryView::new(notifications.clone()),
            notifications,
            toasts: Vec::new(),
        }
    }

    /// Move queued notifications on screen; returns a task that expires them
    fn collect_notifications(&mut self) -> Task<Message> {
        let fresh = self.notifications.drain();
        if fresh.is_empty() {
            return Task::none();
        }
        let now = Instant::now();
        let longest = fresh
            .iter()
            .map(|n| n.duration)
            .max()
            .unwrap_or(obs_admin_core::notification::DEFAULT_DURATION);
        self.toasts.extend(fresh.into_iter().map(|notification| Toast {
            notification,
            shown_at: now,
        }));
        Task::perform(tokio::time::sleep(longest), |_| Message::ExpireNotifications)
    }
}

pub fn initialize() -> (AppState, Task<Message>) {
    let mut state = AppState::new();
    let tasks = Task::batch([
        state.items.load_first_page().map(Message::Items),
        state.inventory.initial_load().map(Message::Inventory),
    ]);
    (state, tasks)
}

pub fn update(state: &mut AppState, message: Message) -> Task<Message> {
    let task = match message {
        Message::ShowScreen(screen) => {
            state.screen = screen;
            Task::none()
        }
        Message::Items(message) => state.items.update(message).map(Message::Items),
        Message::Inventory(message) => state.inventory.update(message).map(Message::Inventory),
        Message::ExpireNotifications => {
            state
                .toasts
                .retain(|t| t.shown_at.elapsed() < t.notification.duration);
            Task::none()
        }
    };
    Task::batch([task, state.collect_notifications()])
}

pub fn view(state: &AppState) -> Element<Message> {
    let nav = row![
        nav_button("Item Management", Screen::Items, state.screen),
        nav_button("Inventory Management", Screen::Inventory, state.screen),
    ]
    .spacing(10);

    let screen = match state.screen {
        Screen::Items => state.items.view().map(Message::Items),
        Screen::Inventory => state.inventory.view().map(Message::Inventory),
    };

    let page = container(column![nav, screen].spacing(20))
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill);

    let (top, middle): (Vec<_>, Vec<_>) = state
        .toasts
        .iter()
        .map(|t| t.notification.clone())
        .partition(|n| n.position == NotificationPosition::TopCenter);

    stack![
        page,
        container(notification_stack(&top))
            .center_x(Length::Fill)
            .padding(10),
        container(notification_stack(&middle))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    ]
    .into()
}

fn nav_button(label: &str, target: Screen, current: Screen) -> Element<Message> {
    let style = if target == current {
        button::primary
    } else {
        button::secondary
    };
    button(label)
        .style(style)
        .on_press(Message::ShowScreen(target))
        .padding(8)
        .into()
}
