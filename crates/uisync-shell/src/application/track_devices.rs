//! DeviceInventoryTracker: turns periodic device enumerations into diffs.
//!
//! The tracker owns the previous [`DeviceSnapshot`] exclusively.  Each scan
//! builds a new snapshot, diffs it against the previous one, tells the user
//! about any arrivals or departures, and then replaces the stored snapshot.
//! Nothing else ever reads or writes that snapshot, so a scan can never
//! observe a half-updated inventory.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use uisync_core::{device_change_message, diff_snapshots, DeviceDiff, DeviceSnapshot};

/// Error type for device enumeration.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The platform has no device enumeration service.
    #[error("device enumeration unavailable: {0}")]
    Unavailable(String),
    /// The device list could not be read.
    #[error("failed to read device list at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Enumerates the display names of all attached input devices.
///
/// Each supported platform provides an implementation in the infrastructure
/// layer.  Duplicate names are expected and must be returned once per device.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceEnumerator: Send + Sync {
    fn enumerate_attached_devices(&self) -> Result<Vec<String>, EnumerationError>;
}

/// Delivers a short user-visible message.  Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Holds the last-known device inventory and diffs each scan against it.
pub struct DeviceInventoryTracker {
    enumerator: Arc<dyn DeviceEnumerator>,
    notifier: Arc<dyn Notifier>,
    previous: DeviceSnapshot,
    scans: u64,
    // Set by the first enumeration that succeeded; failed scans do not count.
    enumerated: bool,
    notify_on_first_scan: bool,
}

impl DeviceInventoryTracker {
    /// Creates a tracker with an empty previous snapshot.
    pub fn new(enumerator: Arc<dyn DeviceEnumerator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            enumerator,
            notifier,
            previous: DeviceSnapshot::new(),
            scans: 0,
            enumerated: false,
            notify_on_first_scan: true,
        }
    }

    /// Suppresses the "Detected:" notification for devices present at startup.
    pub fn with_first_scan_notification(mut self, enabled: bool) -> Self {
        self.notify_on_first_scan = enabled;
        self
    }

    /// Diffs `current_enumeration` against the previous scan and stores it.
    ///
    /// When `first_run` is set, arrivals are labelled "Detected" instead of
    /// "Connected".  The notifier is only called if the diff has events.
    pub fn scan<I, S>(&mut self, current_enumeration: I, first_run: bool) -> DeviceDiff
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let current = DeviceSnapshot::from_names(current_enumeration);
        let diff = diff_snapshots(&self.previous, &current, first_run);
        self.previous = current;
        self.scans += 1;

        if let Some(message) = device_change_message(&diff) {
            info!(
                connected = diff.connections.len(),
                disconnected = diff.disconnections.len(),
                "device inventory changed"
            );
            if first_run && !self.notify_on_first_scan {
                debug!("first-scan notification suppressed");
            } else {
                self.notifier.notify(&message);
            }
        }

        diff
    }

    /// Enumerates the attached devices and scans them.
    ///
    /// The first *successful* enumeration is treated as the first run, so
    /// devices present at startup are reported as "Detected" even when the
    /// service was briefly unavailable.  An enumeration failure is logged and
    /// treated as "no devices attached"; it is never returned.
    pub fn scan_attached(&mut self) -> DeviceDiff {
        let first_run = !self.enumerated;
        let names = match self.enumerator.enumerate_attached_devices() {
            Ok(names) => {
                self.enumerated = true;
                names
            }
            Err(e) => {
                warn!("device enumeration failed, assuming no devices: {e}");
                Vec::new()
            }
        };
        self.scan(names, first_run)
    }

    /// The snapshot stored by the most recent scan.
    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.previous
    }

    /// Number of scans completed so far.
    pub fn scans(&self) -> u64 {
        self.scans
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
