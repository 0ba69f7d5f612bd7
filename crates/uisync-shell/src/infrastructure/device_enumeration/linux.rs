//! Linux device enumeration via evdev.
//!
//! Every input device registered with the kernel has an `eventN` node under
//! `/dev/input`.  [`evdev::enumerate`] opens each node and reports its name.
//! A USB keyboard usually registers several interfaces under the same name,
//! which is exactly the duplicate-name case the snapshot counts handle.
//!
//! Opening event nodes requires read access (root or the `input` group).
//! Nodes that cannot be opened are skipped by `evdev`; if *none* can be
//! opened the scan is reported as an error rather than as "no devices".

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::application::track_devices::{DeviceEnumerator, EnumerationError};

/// Directory holding the evdev nodes.
pub const INPUT_DIR: &str = "/dev/input";

/// Name reported for devices that do not expose one.
const UNKNOWN_DEVICE: &str = "Unknown";

/// Enumerates attached input devices through evdev.
#[derive(Debug, Clone, Default)]
pub struct LinuxInputDeviceEnumerator;

impl LinuxInputDeviceEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceEnumerator for LinuxInputDeviceEnumerator {
    fn enumerate_attached_devices(&self) -> Result<Vec<String>, EnumerationError> {
        let event_nodes = count_event_nodes(Path::new(INPUT_DIR))?;

        let names: Vec<String> = evdev::enumerate()
            .map(|(_, device)| display_name(device.name()))
            .collect();

        ensure_readable(event_nodes, names.len())?;
        trace!(count = names.len(), event_nodes, "enumerated input devices");
        Ok(names)
    }
}

/// Counts the `eventN` nodes in `dir`.
fn count_event_nodes(dir: &Path) -> Result<usize, EnumerationError> {
    let entries = std::fs::read_dir(dir).map_err(|source| EnumerationError::Io {
        path: PathBuf::from(dir),
        source,
    })?;
    Ok(entries
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("event"))
        .count())
}

fn display_name(name: Option<&str>) -> String {
    name.unwrap_or(UNKNOWN_DEVICE).to_string()
}

/// Rejects a scan that saw event nodes but could open none of them.
fn ensure_readable(event_nodes: usize, opened: usize) -> Result<(), EnumerationError> {
    if event_nodes > 0 && opened == 0 {
        return Err(EnumerationError::Unavailable(format!(
            "{event_nodes} event nodes in {INPUT_DIR} but none could be opened (permission denied?)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_unknown() {
        assert_eq!(display_name(Some("USB Keyboard")), "USB Keyboard");
        assert_eq!(display_name(None), "Unknown");
    }

    #[test]
    fn test_unopenable_nodes_are_an_error() {
        let result = ensure_readable(4, 0);
        assert!(matches!(result, Err(EnumerationError::Unavailable(_))));
    }

    #[test]
    fn test_partial_or_empty_access_is_accepted() {
        assert!(ensure_readable(4, 2).is_ok());
        assert!(ensure_readable(0, 0).is_ok());
    }

    #[test]
    fn test_count_event_nodes_ignores_other_entries() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("uisync_input_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("by-id")).unwrap();
        std::fs::write(dir.join("event0"), b"").unwrap();
        std::fs::write(dir.join("event7"), b"").unwrap();
        std::fs::write(dir.join("mice"), b"").unwrap();

        // Act
        let count = count_event_nodes(&dir).unwrap();

        // Assert
        assert_eq!(count, 2);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_input_dir_is_io_error() {
        let result = count_event_nodes(Path::new("/nonexistent/path/that/cannot/exist/input"));
        assert!(matches!(result, Err(EnumerationError::Io { .. })));
    }
}
