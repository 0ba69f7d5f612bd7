//! SoftInputVisibilityMonitor: derives soft input panel visibility from
//! layout geometry callbacks.
//!
//! The monitor starts in [`KeyboardVisibilityState::Hidden`] and only changes
//! state when a geometry sample crosses the occlusion threshold.  Repeated
//! samples on the same side of the threshold are no-ops.

use std::sync::Arc;

use tracing::{debug, info};
use uisync_core::{
    classify, domain::soft_input::transition, occluded_ratio, KeyboardVisibilityState,
    VisibilityTransition,
};

/// Receives the "soft keyboard closed" signal on the native side.
#[cfg_attr(test, mockall::automock)]
pub trait SoftKeyboardSink: Send + Sync {
    fn notify_keyboard_closed(&self);
}

/// Tracks whether the soft input panel is currently occupying screen space.
pub struct SoftInputVisibilityMonitor {
    sink: Arc<dyn SoftKeyboardSink>,
    state: KeyboardVisibilityState,
}

impl SoftInputVisibilityMonitor {
    pub fn new(sink: Arc<dyn SoftKeyboardSink>) -> Self {
        Self {
            sink,
            state: KeyboardVisibilityState::Hidden,
        }
    }

    /// Current visibility.
    pub fn state(&self) -> KeyboardVisibilityState {
        self.state
    }

    /// Marks the panel hidden after it was dismissed programmatically.
    ///
    /// No closing signal is sent; the native side is not involved in a
    /// dismissal it did not see.  A later geometry sample that still shows
    /// occlusion opens the panel again through the normal path.
    pub fn assume_hidden(&mut self) {
        if self.state.is_visible() {
            debug!("soft keyboard dismissed; assuming hidden");
        }
        self.state = KeyboardVisibilityState::Hidden;
    }

    /// Handles a geometry change.
    ///
    /// Returns the transition taken, if any.  The caller must re-enforce the
    /// display mode on every returned transition.  On
    /// [`VisibilityTransition::Closed`] the native side has already been
    /// told about it.
    ///
    /// Degenerate samples (zero screen height, visible frame out of range)
    /// leave the state untouched.
    pub fn on_geometry_changed(
        &mut self,
        visible_frame_height: i32,
        total_screen_height: i32,
    ) -> Option<VisibilityTransition> {
        let ratio = match occluded_ratio(visible_frame_height, total_screen_height) {
            Ok(ratio) => ratio,
            Err(e) => {
                debug!("ignoring geometry sample: {e}");
                return None;
            }
        };

        let next = classify(ratio);
        let edge = transition(self.state, next)?;
        self.state = next;

        match edge {
            VisibilityTransition::Opened => {
                info!(ratio, "soft keyboard open");
            }
            VisibilityTransition::Closed => {
                info!(ratio, "soft keyboard closed");
                self.sink.notify_keyboard_closed();
            }
        }
        Some(edge)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
