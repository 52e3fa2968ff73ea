use crate::error::AdminError;
use crate::notification::{Notification, Notifications};
use log::warn;

pub const ITEM_DELETED: &str = "Item deleted";
pub const FAILED_TO_DELETE_ITEM: &str = "Failed to delete item";

type DeleteAction<T> = Box<dyn FnMut(&T) -> Result<(), AdminError>>;

struct PendingDelete<T> {
    item: T,
    prompt: String,
    delete: DeleteAction<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    NotOpen,
}

/// Blocking "are you sure?" prompt in front of a delete action
pub struct ConfirmDeleteDialog<T> {
    pending: Option<PendingDelete<T>>,
    on_success: Box<dyn FnMut()>,
    notifications: Notifications,
}

impl<T> ConfirmDeleteDialog<T> {
    pub fn new(notifications: Notifications) -> Self {
        Self {
            pending: None,
            on_success: Box::new(|| {}),
            notifications,
        }
    }

    pub fn on_success<F: FnMut() + 'static>(mut self, on_success: F) -> Self {
        self.on_success = Box::new(on_success);
        self
    }

    pub fn show<N, D>(&mut self, item: T, name_getter: N, delete: D)
    where
        N: Fn(&T) -> String,
        D: FnMut(&T) -> Result<(), AdminError> + 'static,
    {
        let prompt = format!(
            "Are you sure you want to delete item: {}?",
            name_getter(&item)
        );
        self.pending = Some(PendingDelete {
            item,
            prompt,
            delete: Box::new(delete),
        });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn header_title(&self) -> &'static str {
        "Confirm Delete"
    }

    pub fn prompt(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.prompt.as_str())
    }

    pub fn item(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.item)
    }

    /// Run the delete. Success closes the dialog; failure leaves it open.
    pub fn confirm(&mut self) -> DeleteOutcome {
        let Some(pending) = self.pending.as_mut() else {
            return DeleteOutcome::NotOpen;
        };

        match (pending.delete)(&pending.item) {
            Ok(()) => {
                self.pending = None;
                self.notifications.show(Notification::info(ITEM_DELETED));
                (self.on_success)();
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!("{}: {}", FAILED_TO_DELETE_ITEM, e);
                self.notifications
                    .show(Notification::error(FAILED_TO_DELETE_ITEM));
                DeleteOutcome::Failed
            }
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
