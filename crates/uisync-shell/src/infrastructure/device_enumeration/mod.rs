//! Platform-specific attached-device enumeration.
//!
//! Each platform implements [`DeviceEnumerator`]; the correct one is selected
//! at compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeDeviceEnumerator`:
//!
//! | Module   | OS        | Source                                         |
//! |----------|-----------|------------------------------------------------|
//! | `linux`  | Linux     | `evdev` nodes under `/dev/input`               |
//! | (none)   | elsewhere | [`UnavailableDeviceEnumerator`], always errors |
//!
//! An enumeration error is not fatal: the tracker logs it and treats the scan
//! as "no devices attached".
//!
//! A [`mock::ScriptedDeviceEnumerator`] is always compiled so tests on any
//! platform can drive device changes by hand.

use std::sync::Arc;

use crate::application::track_devices::{DeviceEnumerator, EnumerationError};

pub mod mock;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxInputDeviceEnumerator as NativeDeviceEnumerator;

// ── Fallback ──────────────────────────────────────────────────────────────────

/// Enumerator for platforms without evdev.  Every call fails with
/// [`EnumerationError::Unavailable`].
#[derive(Debug, Default)]
pub struct UnavailableDeviceEnumerator;

impl DeviceEnumerator for UnavailableDeviceEnumerator {
    fn enumerate_attached_devices(&self) -> Result<Vec<String>, EnumerationError> {
        Err(EnumerationError::Unavailable(format!(
            "no device enumeration on {}",
            std::env::consts::OS
        )))
    }
}

#[cfg(not(target_os = "linux"))]
pub use self::UnavailableDeviceEnumerator as NativeDeviceEnumerator;

/// Builds the enumerator for the current platform.
pub fn native_enumerator() -> Arc<dyn DeviceEnumerator> {
    Arc::new(NativeDeviceEnumerator::default())
}
