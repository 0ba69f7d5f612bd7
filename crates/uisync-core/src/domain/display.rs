//! Display chrome modes.

use super::soft_input::KeyboardVisibilityState;

/// How much system chrome (status bar, navigation bar) the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayChromeMode {
    /// Navigation and status chrome hidden, with sticky re-hide requested.
    Immersive,
    /// Chrome partially visible so it does not fight an open soft input panel.
    Relaxed,
}

impl DisplayChromeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immersive => "immersive",
            Self::Relaxed => "relaxed",
        }
    }
}

impl std::fmt::Display for DisplayChromeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The desired chrome mode for a given soft input visibility.
pub fn mode_for(visibility: KeyboardVisibilityState) -> DisplayChromeMode {
    match visibility {
        KeyboardVisibilityState::Visible => DisplayChromeMode::Relaxed,
        KeyboardVisibilityState::Hidden => DisplayChromeMode::Immersive,
    }
}
