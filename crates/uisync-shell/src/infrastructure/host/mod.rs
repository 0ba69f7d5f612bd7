//! Host-side adapters: the window compositor and the native emulation core.
//!
//! The real targets (a mobile window manager, the emulator's native text
//! input switch) are reached through the traits in the application layer.
//! [`LoggingHost`] implements all of them by emitting structured `tracing`
//! events, which is what the headless binary runs with; an embedding shell
//! swaps it for its own bindings.
//!
//! [`mock::RecordingHost`] records every command in order for tests.

pub mod mock;

use tracing::info;
use uisync_core::DisplayChromeMode;

use crate::application::{
    enforce_display::HostDisplay, route_input::NativeTextInput, soft_input::SoftKeyboardSink,
};

/// Log target used for every host command.
pub const HOST_LOG_TARGET: &str = "uisync::host";

/// Host and native-core adapter that logs each command.
#[derive(Debug, Default)]
pub struct LoggingHost;

impl LoggingHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostDisplay for LoggingHost {
    fn set_display_chrome_mode(&self, mode: DisplayChromeMode) {
        // Debug level: this fires on every enforcement tick.
        tracing::debug!(target: HOST_LOG_TARGET, %mode, "set display chrome mode");
    }

    fn request_soft_input_focus(&self) {
        tracing::debug!(target: HOST_LOG_TARGET, "request soft input focus");
    }

    fn dismiss_soft_input(&self) {
        info!(target: HOST_LOG_TARGET, "dismiss soft input");
    }
}

impl NativeTextInput for LoggingHost {
    fn enable_text_input_for_physical_keyboard(&self) {
        info!(target: HOST_LOG_TARGET, "native: enable text input for physical keyboard");
    }

    fn disable_text_input_for_physical_keyboard(&self) {
        info!(target: HOST_LOG_TARGET, "native: disable text input for physical keyboard");
    }
}

impl SoftKeyboardSink for LoggingHost {
    fn notify_keyboard_closed(&self) {
        info!(target: HOST_LOG_TARGET, "native: soft keyboard closed");
    }
}
