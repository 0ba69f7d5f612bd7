//! # uisync-core
//!
//! Shared domain library for UiSync, the layer that keeps an emulator
//! front-end's presentation (immersive display, soft input panel) and input
//! routing (virtual vs. physical keyboard) in step with two noisy facts:
//!
//! - which peripheral devices are attached right now, and
//! - whether a software input panel is currently covering part of the screen.
//!
//! This crate has zero dependencies on OS APIs, async runtimes, or UI
//! toolkits.  It defines:
//!
//! - **`domain::devices`** – Multiset snapshots of attached device names and
//!   the differencing engine that turns two snapshots into connect/disconnect
//!   events plus a "physical keyboard present" flag.
//!
//! - **`domain::soft_input`** – The occlusion-ratio heuristic (fixed 0.15
//!   threshold) and the Hidden/Visible state machine edges.
//!
//! - **`domain::display`** – Immersive vs. Relaxed chrome, and which one a
//!   given keyboard visibility calls for.
//!
//! - **`notification`** – The text shown to the user when devices come and go.

pub mod domain;
pub mod notification;

pub use domain::devices::{
    diff_snapshots, is_keyboard_name, ArrivalKind, DeviceChange, DeviceDiff, DeviceSnapshot,
};
pub use domain::display::{mode_for, DisplayChromeMode};
pub use domain::soft_input::{
    classify, occluded_ratio, GeometryError, KeyboardVisibilityState, VisibilityTransition,
    OCCLUSION_THRESHOLD,
};
pub use notification::device_change_message;
