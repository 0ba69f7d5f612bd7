//! Infrastructure layer: OS, host and runtime adapters.
//!
//! - **`device_enumeration`** – Platform device lists behind `DeviceEnumerator`.
//! - **`host`** – Host display and native-core adapters, plus a recorder.
//! - **`notifier`** – Where user-visible device notifications go.
//! - **`scheduler`** – Fixed-period event sources for the session channel.
//! - **`geometry_feed`** – Text feed of layout and lifecycle events.
//! - **`storage`** – TOML configuration on disk.

pub mod device_enumeration;
pub mod geometry_feed;
pub mod host;
pub mod notifier;
pub mod scheduler;
pub mod storage;
