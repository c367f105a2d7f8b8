//! Shopper-facing notifications.
//!
//! Failures never abort a session; they become notifications that the front
//! end drains and shows (the CLI prints them after every command).

use core::fmt;

use crate::error::StoreError;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A single message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

impl From<&StoreError> for Notification {
    fn from(err: &StoreError) -> Self {
        Self::error(err.user_message())
    }
}

/// FIFO queue of pending notifications.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }
}
