use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

/// How long a notice should stay on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Short-lived confirmation of a successful mutation.
    Brief,
    /// Longer-lived notice for a mutation that stored nothing or failed.
    Persistent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub issued_at: String,
}

/// Fire-and-forget sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Logs every notice and buffers it until the presentation layer drains it.
#[derive(Default)]
pub struct NotificationFeed {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }
}

impl Notifier for NotificationFeed {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Brief => info!("notify: {}", message),
            Severity::Persistent => warn!("notify: {}", message),
        }

        let notification = Notification {
            message: message.to_string(),
            severity,
            issued_at: Utc::now().to_rfc3339(),
        };
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}
