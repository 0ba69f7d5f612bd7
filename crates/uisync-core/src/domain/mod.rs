//! Domain entities for UiSync.
//!
//! Pure state-machine logic with no OS, async, or I/O dependencies.  Everything
//! here can be unit-tested on any platform without a display or input devices.
//!
//! The outer layers (`uisync-shell`) feed raw observations in (device names,
//! window heights) and turn the results into host commands.  The domain never
//! calls out.

/// Device snapshots and the connect/disconnect differencing engine.
pub mod devices;

/// Display chrome modes.
pub mod display;

/// Soft input panel visibility inferred from geometry.
pub mod soft_input;
