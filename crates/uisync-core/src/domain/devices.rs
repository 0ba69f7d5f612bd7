//! Device inventory snapshots and the differencing engine.
//!
//! The host platform only tells us *which* peripheral names are attached right
//! now.  It does not deliver reliable connect/disconnect edges, so every scan
//! produces a fresh [`DeviceSnapshot`] and [`diff_snapshots`] turns the pair
//! (previous, current) into connection and disconnection events.
//!
//! # Why count occurrences? (for beginners)
//!
//! Device display names are not unique.  Two identical gamepads both report
//! `"Wireless Controller"`.  A plain set of names would hide the second one,
//! so a snapshot is a *multiset*: name → how many devices carry that name.
//! Unplugging one of the two gamepads lowers the count from 2 to 1, which the
//! diff reports as exactly one disconnection.

use std::collections::BTreeMap;

use tracing::trace;

/// Substring that marks a device as keyboard-class (matched case-insensitively).
pub const KEYBOARD_MARKER: &str = "keyboard";

/// Returns `true` when `name` contains [`KEYBOARD_MARKER`], ignoring case.
///
/// This is a deliberate heuristic: devices such as "USB Keyboard" or
/// "KEYBOARD-X" match, "Mouse" does not.  A keyboard whose name omits the word
/// is not detected.
pub fn is_keyboard_name(name: &str) -> bool {
    name.to_lowercase().contains(KEYBOARD_MARKER)
}

/// Point-in-time count of attached devices, keyed by display name.
///
/// A name absent from the snapshot is equivalent to a count of zero; zero
/// counts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    counts: BTreeMap<String, u32>,
}

impl DeviceSnapshot {
    /// Creates an empty snapshot (no devices attached).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot by counting occurrences of each name in `names`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = BTreeMap::new();
        for name in names {
            *counts.entry(name.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of attached devices carrying `name`.
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Iterates over `(name, count)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Total number of attached devices.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns `true` if any attached device is keyboard-class.
    pub fn has_keyboard(&self) -> bool {
        self.counts.keys().any(|name| is_keyboard_name(name))
    }
}

impl<S: Into<String>> FromIterator<S> for DeviceSnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

/// A change in the number of devices sharing one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceChange {
    pub name: String,
    /// How many devices with this name appeared or disappeared (always >= 1).
    pub delta: u32,
}

/// How newly seen devices are labelled in user-facing messages.
///
/// The distinction is cosmetic: devices already attached when tracking starts
/// are "detected", devices plugged in later are "connected".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalKind {
    Connected,
    Detected,
}

/// Result of comparing two consecutive device snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDiff {
    /// Names whose count decreased, in name order.
    pub disconnections: Vec<DeviceChange>,
    /// Names whose count increased, in name order.
    pub connections: Vec<DeviceChange>,
    /// Label for the `connections` list.
    pub arrival_kind: ArrivalKind,
    /// `true` iff the *current* snapshot contains a keyboard-class name.
    pub hardware_keyboard_present: bool,
}

impl DeviceDiff {
    /// Returns `true` when neither list contains an event.
    pub fn is_unchanged(&self) -> bool {
        self.disconnections.is_empty() && self.connections.is_empty()
    }

    /// One name per unit decrease, e.g. a delta of 2 yields the name twice.
    pub fn disconnection_events(&self) -> impl Iterator<Item = &str> {
        expand_units(&self.disconnections)
    }

    /// One name per unit increase.
    pub fn connection_events(&self) -> impl Iterator<Item = &str> {
        expand_units(&self.connections)
    }
}

fn expand_units(changes: &[DeviceChange]) -> impl Iterator<Item = &str> {
    changes
        .iter()
        .flat_map(|c| std::iter::repeat(c.name.as_str()).take(c.delta as usize))
}

/// Computes the diff between `previous` and `current`.
///
/// `first_run` only affects [`DeviceDiff::arrival_kind`].  The keyboard flag is
/// derived from `current` alone, never from the diff itself: a keyboard that
/// was attached before and still is keeps the flag `true`.
pub fn diff_snapshots(
    previous: &DeviceSnapshot,
    current: &DeviceSnapshot,
    first_run: bool,
) -> DeviceDiff {
    let disconnections: Vec<DeviceChange> = previous
        .iter()
        .filter_map(|(name, old)| {
            let new = current.count(name);
            (old > new).then(|| DeviceChange {
                name: name.to_string(),
                delta: old - new,
            })
        })
        .collect();

    let connections: Vec<DeviceChange> = current
        .iter()
        .filter_map(|(name, new)| {
            let old = previous.count(name);
            (new > old).then(|| DeviceChange {
                name: name.to_string(),
                delta: new - old,
            })
        })
        .collect();

    trace!(
        removed = disconnections.len(),
        added = connections.len(),
        "device snapshot diffed"
    );

    DeviceDiff {
        disconnections,
        connections,
        arrival_kind: if first_run {
            ArrivalKind::Detected
        } else {
            ArrivalKind::Connected
        },
        hardware_keyboard_present: current.has_keyboard(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
