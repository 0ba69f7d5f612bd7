//! InputRoutingController: switches the native core between virtual and
//! physical keyboard text capture.
//!
//! The controller is the only writer of the native text-input switch, and it
//! only writes on a transition of "hardware keyboard present".  Repeated scans
//! that agree with the current state issue nothing.

use std::sync::Arc;

use tracing::{debug, info};
use uisync_core::DeviceDiff;

/// Native-core commands for physical keyboard text capture.
#[cfg_attr(test, mockall::automock)]
pub trait NativeTextInput: Send + Sync {
    fn enable_text_input_for_physical_keyboard(&self);
    fn disable_text_input_for_physical_keyboard(&self);
}

/// What the caller must do with the display after a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFollowUp {
    /// Nothing to do.
    None,
    /// Re-enforce the mode that matches the current keyboard visibility.
    Enforce,
    /// Dismiss the soft input panel and go immersive unconditionally.
    ForceImmersive,
}

/// Owns the "hardware keyboard available" state.
pub struct InputRoutingController {
    native: Arc<dyn NativeTextInput>,
    hardware_keyboard: bool,
}

impl InputRoutingController {
    pub fn new(native: Arc<dyn NativeTextInput>) -> Self {
        Self {
            native,
            hardware_keyboard: false,
        }
    }

    pub fn hardware_keyboard_present(&self) -> bool {
        self.hardware_keyboard
    }

    /// Reacts to a device scan.
    ///
    /// - false → true: enable physical-keyboard text capture.
    /// - true → false: disable it and ask for display re-enforcement, since the
    ///   physical-keyboard session no longer needs relaxed chrome.
    pub fn on_device_diff(&mut self, diff: &DeviceDiff) -> DisplayFollowUp {
        let present = diff.hardware_keyboard_present;
        if present == self.hardware_keyboard {
            debug!(present, "hardware keyboard state unchanged");
            return DisplayFollowUp::None;
        }
        self.hardware_keyboard = present;

        if present {
            info!("hardware keyboard attached; enabling physical text input");
            self.native.enable_text_input_for_physical_keyboard();
            DisplayFollowUp::None
        } else {
            info!("hardware keyboard removed; disabling physical text input");
            self.native.disable_text_input_for_physical_keyboard();
            DisplayFollowUp::Enforce
        }
    }

    /// Lifecycle hook: emulation is starting.
    pub fn on_emulation_start(&self) -> DisplayFollowUp {
        debug!("emulation start");
        DisplayFollowUp::ForceImmersive
    }

    /// Lifecycle hook: emulation ended.  The native core drops text capture
    /// while emulating, so restore it if a keyboard is still attached.
    pub fn on_emulation_end(&self) -> DisplayFollowUp {
        if self.hardware_keyboard {
            info!("emulation ended; restoring physical text input");
            self.native.enable_text_input_for_physical_keyboard();
        }
        DisplayFollowUp::None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
