//! Recording host adapter for unit and integration tests.
//!
//! # Why one recorder for every port?
//!
//! Several scenarios care about the *relative* order of commands that go to
//! different collaborators, e.g. "disable physical text input, *then* apply
//! immersive mode".  Recording host-display and native-core commands into one
//! shared log keeps that order observable.
//!
//! # Usage in tests
//!
//! ```ignore
//! let host = Arc::new(RecordingHost::new());
//! let ports = SessionPorts {
//!     host: host.clone(),
//!     text_input: host.clone(),
//!     keyboard_sink: host.clone(),
//!     ..
//! };
//! // ... drive the session ...
//! assert_eq!(host.commands(), vec![HostCommand::EnableTextInput]);
//! ```

use std::sync::Mutex;

use uisync_core::DisplayChromeMode;

use crate::application::{
    enforce_display::HostDisplay, route_input::NativeTextInput, soft_input::SoftKeyboardSink,
};

/// One outbound command, as seen by the host or native core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    SetChromeMode(DisplayChromeMode),
    RequestSoftInputFocus,
    DismissSoftInput,
    EnableTextInput,
    DisableTextInput,
    KeyboardClosed,
}

/// Records every command in call order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    commands: Mutex<Vec<HostCommand>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every command recorded so far.
    pub fn commands(&self) -> Vec<HostCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Forgets all recorded commands.
    pub fn clear(&self) {
        self.commands.lock().unwrap().clear();
    }

    /// Number of recorded commands equal to `command`.
    pub fn count(&self, command: HostCommand) -> usize {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == command)
            .count()
    }

    /// The chrome mode most recently applied, if any.
    pub fn current_mode(&self) -> Option<DisplayChromeMode> {
        self.commands.lock().unwrap().iter().rev().find_map(|c| match c {
            HostCommand::SetChromeMode(mode) => Some(*mode),
            _ => None,
        })
    }

    fn record(&self, command: HostCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

impl HostDisplay for RecordingHost {
    fn set_display_chrome_mode(&self, mode: DisplayChromeMode) {
        self.record(HostCommand::SetChromeMode(mode));
    }

    fn request_soft_input_focus(&self) {
        self.record(HostCommand::RequestSoftInputFocus);
    }

    fn dismiss_soft_input(&self) {
        self.record(HostCommand::DismissSoftInput);
    }
}

impl NativeTextInput for RecordingHost {
    fn enable_text_input_for_physical_keyboard(&self) {
        self.record(HostCommand::EnableTextInput);
    }

    fn disable_text_input_for_physical_keyboard(&self) {
        self.record(HostCommand::DisableTextInput);
    }
}

impl SoftKeyboardSink for RecordingHost {
    fn notify_keyboard_closed(&self) {
        self.record(HostCommand::KeyboardClosed);
    }
}
