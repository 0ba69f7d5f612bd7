//! Scripted device enumerator for tests.
//!
//! Holds the "currently attached" device list in a `Mutex` so a test can plug
//! and unplug devices between scans, or make the service unavailable to
//! exercise the empty-enumeration fallback.

use std::sync::Mutex;

use crate::application::track_devices::{DeviceEnumerator, EnumerationError};

/// An enumerator whose answer is set by the test.
#[derive(Debug)]
pub struct ScriptedDeviceEnumerator {
    /// `None` means the enumeration service is unavailable.
    devices: Mutex<Option<Vec<String>>>,
}

impl ScriptedDeviceEnumerator {
    /// Creates an enumerator reporting no devices.
    pub fn new() -> Self {
        Self {
            devices: Mutex::new(Some(Vec::new())),
        }
    }

    /// Replaces the attached device list.
    pub fn set_devices<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.devices.lock().unwrap() = Some(names.into_iter().map(Into::into).collect());
    }

    /// Makes every following enumeration fail until `set_devices` is called.
    pub fn set_unavailable(&self) {
        *self.devices.lock().unwrap() = None;
    }
}

impl Default for ScriptedDeviceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceEnumerator for ScriptedDeviceEnumerator {
    fn enumerate_attached_devices(&self) -> Result<Vec<String>, EnumerationError> {
        self.devices
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| EnumerationError::Unavailable("scripted outage".into()))
    }
}
