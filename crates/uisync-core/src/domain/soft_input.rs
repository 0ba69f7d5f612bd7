//! Soft input panel visibility, inferred from window geometry.
//!
//! The host never says "the on-screen keyboard opened".  What it does report is
//! the height of the visible window frame.  When a large enough slice of the
//! screen is occluded, the panel is assumed to be open.
//!
//! The 15 % threshold is a fixed platform-compatibility heuristic.  Tall
//! toolbars or split-screen layouts can occlude more than 15 % without a
//! keyboard (false positive), and floating or very compact keyboards can stay
//! below it (false negative).

use thiserror::Error;

/// Occluded-height / screen-height ratio above which the panel counts as open.
///
/// The comparison is strict: exactly `0.15` is still hidden.
pub const OCCLUSION_THRESHOLD: f64 = 0.15;

/// Binary visibility of the soft input panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyboardVisibilityState {
    #[default]
    Hidden,
    Visible,
}

impl KeyboardVisibilityState {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Error type for geometry samples that cannot produce a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The total screen height was zero or negative.
    #[error("degenerate screen height {0}")]
    DegenerateTotal(i32),
    /// The visible frame is taller than the screen or negative.
    #[error("visible height {visible} outside 0..={total}")]
    VisibleOutOfRange { visible: i32, total: i32 },
}

/// Computes `(total - visible) / total`.
///
/// # Errors
///
/// Returns [`GeometryError`] when `total <= 0` (guarding the division) or when
/// `visible` lies outside `0..=total`.
pub fn occluded_ratio(visible_frame_height: i32, total_screen_height: i32) -> Result<f64, GeometryError> {
    if total_screen_height <= 0 {
        return Err(GeometryError::DegenerateTotal(total_screen_height));
    }
    if !(0..=total_screen_height).contains(&visible_frame_height) {
        return Err(GeometryError::VisibleOutOfRange {
            visible: visible_frame_height,
            total: total_screen_height,
        });
    }
    let occluded = f64::from(total_screen_height - visible_frame_height);
    Ok(occluded / f64::from(total_screen_height))
}

/// Classifies a ratio against [`OCCLUSION_THRESHOLD`].
pub fn classify(ratio: f64) -> KeyboardVisibilityState {
    if ratio > OCCLUSION_THRESHOLD {
        KeyboardVisibilityState::Visible
    } else {
        KeyboardVisibilityState::Hidden
    }
}

/// An edge in the visibility state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityTransition {
    Opened,
    Closed,
}

/// Returns the transition from `current` to `next`, or `None` when unchanged.
pub fn transition(
    current: KeyboardVisibilityState,
    next: KeyboardVisibilityState,
) -> Option<VisibilityTransition> {
    match (current, next) {
        (KeyboardVisibilityState::Hidden, KeyboardVisibilityState::Visible) => {
            Some(VisibilityTransition::Opened)
        }
        (KeyboardVisibilityState::Visible, KeyboardVisibilityState::Hidden) => {
            Some(VisibilityTransition::Closed)
        }
        _ => None,
    }
}
