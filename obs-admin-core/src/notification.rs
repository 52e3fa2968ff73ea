//! Transient user-facing messages
//!
//! Components push notifications into a shared queue; the front end drains
//! the queue and decides how to present them.

use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);
const MAX_PENDING: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPosition {
    TopCenter,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub variant: NotificationVariant,
    pub duration: Duration,
    pub position: NotificationPosition,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: NotificationVariant::Info,
            duration: DEFAULT_DURATION,
            position: NotificationPosition::TopCenter,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Success,
            ..Self::info(message)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Error,
            ..Self::info(message)
        }
    }

    pub fn at(mut self, position: NotificationPosition) -> Self {
        self.position = position;
        self
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Error
    }
}

/// Cloneable handle to a shared notification queue
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, notification: Notification) {
        log::debug!("notification: {:?}", notification);
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(notification);
            // Nobody is draining; keep only the most recent ones
            if pending.len() > MAX_PENDING {
                let excess = pending.len() - MAX_PENDING;
                pending.drain(0..excess);
            }
        }
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue() {
        let notifications = Notifications::new();
        let handle = notifications.clone();

        handle.show(Notification::info("Item added!"));
        handle.show(Notification::error("Failed to add item").at(NotificationPosition::Middle));

        assert_eq!(notifications.len(), 2);
        let drained = notifications.drain();
        assert_eq!(drained[0].message, "Item added!");
        assert!(!drained[0].is_error());
        assert!(drained[1].is_error());
        assert_eq!(drained[1].position, NotificationPosition::Middle);
        assert_eq!(drained[1].duration, Duration::from_millis(3000));
        assert!(handle.is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let notifications = Notifications::new();
        for i in 0..(MAX_PENDING + 7) {
            notifications.show(Notification::info(format!("n{}", i)));
        }
        let drained = notifications.drain();
        assert_eq!(drained.len(), MAX_PENDING);
        assert_eq!(drained[0].message, "n7");
    }
}
