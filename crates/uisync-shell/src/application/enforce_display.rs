//! DisplayModeEnforcer: keeps re-asserting the desired chrome mode.
//!
//! The host compositor is free to drop out of immersive mode whenever it
//! likes (a swipe from the edge, a system dialog, a rotation).  There is no
//! reliable "mode reverted" signal, so the enforcer re-sends the desired mode
//! on every call instead of setting it once.  Sending the same mode again has
//! no visible effect, which makes [`DisplayModeEnforcer::enforce`] safe to
//! call at any frequency.

use std::sync::Arc;

use tracing::{info, trace};
use uisync_core::{mode_for, DisplayChromeMode, KeyboardVisibilityState};

/// Commands understood by the host window / compositor.
#[cfg_attr(test, mockall::automock)]
pub trait HostDisplay: Send + Sync {
    /// Applies the chrome mode.  Re-applying the current mode is a no-op.
    fn set_display_chrome_mode(&self, mode: DisplayChromeMode);
    /// Asks the soft input panel to take focus and stay open.
    fn request_soft_input_focus(&self);
    /// Hides the soft input panel.
    fn dismiss_soft_input(&self);
}

/// Re-applies the chrome mode that matches the current keyboard visibility.
pub struct DisplayModeEnforcer {
    host: Arc<dyn HostDisplay>,
    // Only used to tell a mode change from a re-assertion in the logs.
    last_applied: Option<DisplayChromeMode>,
}

impl DisplayModeEnforcer {
    pub fn new(host: Arc<dyn HostDisplay>) -> Self {
        Self {
            host,
            last_applied: None,
        }
    }

    /// Applies the mode for `visibility` and returns it.
    ///
    /// With the keyboard visible the chrome is relaxed and the panel is asked
    /// to keep focus, since some hosts dismiss it right after a chrome change.
    pub fn enforce(&mut self, visibility: KeyboardVisibilityState) -> DisplayChromeMode {
        let mode = mode_for(visibility);
        self.apply(mode);
        if visibility.is_visible() {
            self.host.request_soft_input_focus();
        }
        mode
    }

    /// Dismisses the soft input panel and applies immersive mode regardless
    /// of the last known visibility.
    pub fn force_immersive(&mut self) -> DisplayChromeMode {
        self.host.dismiss_soft_input();
        self.apply(DisplayChromeMode::Immersive);
        DisplayChromeMode::Immersive
    }

    /// The mode sent by the most recent call, if any.
    pub fn last_applied(&self) -> Option<DisplayChromeMode> {
        self.last_applied
    }

    fn apply(&mut self, mode: DisplayChromeMode) {
        if self.last_applied == Some(mode) {
            trace!(%mode, "re-asserting display mode");
        } else {
            info!(%mode, "display mode changed");
        }
        self.host.set_display_chrome_mode(mode);
        self.last_applied = Some(mode);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
