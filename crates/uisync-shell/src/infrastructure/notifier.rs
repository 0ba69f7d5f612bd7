//! Notifier adapters.
//!
//! On a device the notifier is a short-lived toast.  The headless binary has no
//! toast surface, so [`TracingNotifier`] emits each message as an `info` event
//! on its own target, one event per message.

use std::sync::Mutex;

use tracing::info;

use crate::application::track_devices::Notifier;

/// Log target for user-visible notifications.
pub const NOTIFY_LOG_TARGET: &str = "uisync::notify";

/// Emits notifications as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        // Flatten so a multi-line toast stays a single log record.
        let flat = message.replace('\n', " | ");
        info!(target: NOTIFY_LOG_TARGET, "{flat}");
    }
}

/// Records notifications for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every message received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
