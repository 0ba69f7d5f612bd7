//! User-facing text for device inventory changes.
//!
//! Each non-empty event list becomes a block: a single header line
//! (`Disconnected:`, `Connected:` or `Detected:`) followed by one line per
//! device unit.  Blocks are joined with newlines, disconnections first.
//!
//! ```text
//! Disconnected:
//! Wireless Controller
//! Connected:
//! USB Keyboard
//! ```

use crate::domain::devices::{ArrivalKind, DeviceDiff};

pub const DISCONNECTED_HEADER: &str = "Disconnected:";
pub const CONNECTED_HEADER: &str = "Connected:";
pub const DETECTED_HEADER: &str = "Detected:";

/// Builds the notification text for `diff`.
///
/// Returns `None` when the diff carries no events, so callers can skip the
/// notifier entirely.
pub fn device_change_message(diff: &DeviceDiff) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();

    if !diff.disconnections.is_empty() {
        lines.push(DISCONNECTED_HEADER);
        lines.extend(diff.disconnection_events());
    }

    if !diff.connections.is_empty() {
        lines.push(match diff.arrival_kind {
            ArrivalKind::Connected => CONNECTED_HEADER,
            ArrivalKind::Detected => DETECTED_HEADER,
        });
        lines.extend(diff.connection_events());
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
