//! Application layer: the four reconciliation components and the session that
//! owns them.
//!
//! Each component depends only on the traits (ports) it defines itself, so
//! the infrastructure can be swapped without changing this code.  Nothing in
//! this layer spawns tasks or touches the OS.
//!
//! # Sub-modules
//!
//! - **`track_devices`** – Enumerates attached input devices each scan,
//!   diffs them against the previous snapshot, and notifies the user.
//!
//! - **`soft_input`** – Classifies window geometry into soft keyboard
//!   visibility and reports the closing edge to the native core.
//!
//! - **`enforce_display`** – Re-asserts immersive or relaxed display chrome
//!   from the current visibility.
//!
//! - **`route_input`** – Switches the native core between physical-keyboard
//!   text input and soft-keyboard input as hardware keyboards come and go.
//!
//! - **`session`** – Single-threaded dispatcher that feeds every event to the
//!   components above and wires their effects together.

pub mod enforce_display;
pub mod route_input;
pub mod session;
pub mod soft_input;
pub mod track_devices;
