//! Notifications — the operator-feedback collaborator.
//!
//! The engine reports every mutation outcome through an injected [`Notify`]
//! implementation instead of an ambient toast global, so the core stays
//! testable without a UI framework. Notifications are fire-and-forget and
//! never block or fail an operation.

#[cfg(feature = "emitter")]
mod emitter;

use std::sync::{Arc, Mutex};

#[cfg(feature = "emitter")]
pub use emitter::EmitterNotifier;

/// Operator-facing feedback channel.
pub trait Notify: Send + Sync {
    /// Report a successful operation.
    fn success(&self, message: &str);

    /// Report a failure, carrying the underlying message.
    fn error(&self, message: &str);
}

/// Notification kind, for doubles that record what fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Notifier that records everything for assertions. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|mut entries| entries.drain(..).collect())
            .unwrap_or_default()
    }

    /// Messages of recorded success notifications, oldest first.
    pub fn successes(&self) -> Vec<String> {
        self.of_kind(NotificationKind::Success)
    }

    /// Messages of recorded error notifications, oldest first.
    pub fn errors(&self) -> Vec<String> {
        self.of_kind(NotificationKind::Error)
    }

    fn of_kind(&self, kind: NotificationKind) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|n| n.kind == kind)
                    .map(|n| n.message.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, kind: NotificationKind, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification {
                kind,
                message: message.to_string(),
            });
        }
    }
}

impl Notify for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(NotificationKind::Error, message);
    }
}

/// Notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notify for NullNotifier {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
