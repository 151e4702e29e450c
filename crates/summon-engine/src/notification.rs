use std::fmt;

use tokio::sync::mpsc::{Sender, error::TrySendError};
use tracing::info;

use crate::{Error, Result};

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational.
    Info,
    /// Something the user should fix, e.g. an app that could not be found.
    Warn,
    /// An operation failed.
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub text: String,
}

/// Sends notices to whatever presents them.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: Sender<Notice>,
}

impl NotificationDispatcher {
    /// Create a new dispatcher from a notice channel.
    pub fn new(tx: Sender<Notice>) -> Self {
        Self { tx }
    }

    /// Send a notice with the given kind, title, and text.
    pub fn send_notification(&self, kind: NoticeKind, title: String, text: String) -> Result<()> {
        info!(kind = %kind, title = %title, text = %text, "notification_display");
        self.tx
            .try_send(Notice { kind, title, text })
            .map_err(|e| match e {
                TrySendError::Full(_) => Error::ChannelFull,
                TrySendError::Closed(_) => Error::ChannelClosed,
            })
    }

    /// Convenience helper to send a warning.
    pub fn send_warn(&self, title: &str, text: String) -> Result<()> {
        self.send_notification(NoticeKind::Warn, title.to_string(), text)
    }

    /// Convenience helper to send an error.
    pub fn send_error(&self, title: &str, text: String) -> Result<()> {
        self.send_notification(NoticeKind::Error, title.to_string(), text)
    }

    /// Convenience helper to send an informational notice.
    pub fn send_info(&self, title: &str, text: String) -> Result<()> {
        self.send_notification(NoticeKind::Info, title.to_string(), text)
    }
}
