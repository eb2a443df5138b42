//! Transient success/error/info messages.
//!
//! Components never talk to a toast surface directly. They receive a
//! [`Notifier`] and the caller decides how messages get shown.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notification {
    Success(String),
    Error(String),
    Info(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) | Notification::Info(m) => m,
        }
    }
}

pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn info(&mut self, message: &str);
}

/// Keeps every message in emission order, e.g. to hand them back in an HTTP response.
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Notification> {
        self.entries
    }

    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Notifier for NotificationLog {
    fn success(&mut self, message: &str) {
        tracing::debug!("notify success: {message}");
        self.entries.push(Notification::Success(message.into()));
    }

    fn error(&mut self, message: &str) {
        tracing::debug!("notify error: {message}");
        self.entries.push(Notification::Error(message.into()));
    }

    fn info(&mut self, message: &str) {
        tracing::debug!("notify info: {message}");
        self.entries.push(Notification::Info(message.into()));
    }
}
