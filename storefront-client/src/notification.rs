//! User-facing notifications

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient message for the visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// Offer a "view cart" shortcut next to the message
    pub show_cart_button: bool,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            show_cart_button: false,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn with_cart_button(mut self) -> Self {
        self.show_cart_button = true;
        self
    }

    /// How long the message stays up
    pub fn auto_dismiss(&self) -> Duration {
        match self.kind {
            NotificationKind::Info => Duration::from_millis(2000),
            _ if self.show_cart_button => Duration::from_millis(5000),
            _ => Duration::from_millis(3000),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                tracing::warn!(text = %notification.message, "Notification")
            }
            kind => tracing::info!(?kind, text = %notification.message, "Notification"),
        }
    }
}
