//! Integration tests for the UI session.
//!
//! These drive a full `UiSession` through its public event API with the
//! recording adapters, checking the commands that reach the host and the
//! native core, and the notifications shown to the user.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use uisync_core::{DisplayChromeMode, KeyboardVisibilityState};
use uisync_shell::application::session::{SessionOptions, SessionPorts, UiEvent, UiSession};
use uisync_shell::infrastructure::{
    device_enumeration::mock::ScriptedDeviceEnumerator,
    host::mock::{HostCommand, RecordingHost},
    notifier::RecordingNotifier,
    scheduler::PeriodicTask,
};

struct Harness {
    session: UiSession,
    devices: Arc<ScriptedDeviceEnumerator>,
    host: Arc<RecordingHost>,
    notifier: Arc<RecordingNotifier>,
}

fn harness_with(options: SessionOptions) -> Harness {
    let devices = Arc::new(ScriptedDeviceEnumerator::new());
    let host = Arc::new(RecordingHost::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let ports = SessionPorts {
        enumerator: devices.clone(),
        notifier: notifier.clone(),
        host: host.clone(),
        text_input: host.clone(),
        keyboard_sink: host.clone(),
    };
    Harness {
        session: UiSession::new(ports, options),
        devices,
        host,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(SessionOptions::default())
}

fn geometry(visible: i32, total: i32) -> UiEvent {
    UiEvent::GeometryChanged {
        visible_frame_height: visible,
        total_screen_height: total,
    }
}

// ── Device scenarios ──────────────────────────────────────────────────────────

#[test]
fn test_keyboard_plugged_in_enables_text_input_exactly_once() {
    // Arrange: an initial empty scan, then a keyboard arrives
    let mut h = harness();
    h.session.handle(UiEvent::ScanDevices);
    h.devices.set_devices(["USB Keyboard"]);

    // Act
    let diff = h.session.scan_devices();
    h.session.handle(UiEvent::ScanDevices);
    h.session.handle(UiEvent::ScanDevices);

    // Assert
    assert_eq!(diff.connection_events().count(), 1);
    assert!(diff.hardware_keyboard_present);
    assert_eq!(h.host.count(HostCommand::EnableTextInput), 1);
    assert_eq!(h.host.commands(), vec![HostCommand::EnableTextInput]);
    assert_eq!(h.notifier.messages(), vec!["Connected:\nUSB Keyboard".to_string()]);
}

#[test]
fn test_keyboard_unplugged_disables_then_goes_immersive() {
    // Arrange
    let mut h = harness();
    h.devices.set_devices(["USB Keyboard"]);
    h.session.handle(UiEvent::ScanDevices);
    h.host.clear();

    // Act
    h.devices.set_devices(Vec::<String>::new());
    let diff = h.session.scan_devices();

    // Assert
    assert_eq!(diff.disconnection_events().count(), 1);
    assert!(!diff.hardware_keyboard_present);
    assert_eq!(
        h.host.commands(),
        vec![
            HostCommand::DisableTextInput,
            HostCommand::SetChromeMode(DisplayChromeMode::Immersive),
        ]
    );
    assert_eq!(h.session.display_mode(), Some(DisplayChromeMode::Immersive));
}

#[test]
fn test_first_scan_reports_detected_devices() {
    let mut h = harness();
    h.devices.set_devices(["Mouse", "Gamepad", "Gamepad"]);

    h.session.handle(UiEvent::ScanDevices);

    assert_eq!(
        h.notifier.messages(),
        vec!["Detected:\nGamepad\nGamepad\nMouse".to_string()]
    );
    assert!(!h.session.hardware_keyboard_present());
}

#[test]
fn test_quiet_first_scan_still_routes_keyboard() {
    let mut h = harness_with(SessionOptions {
        notify_on_first_scan: false,
    });
    h.devices.set_devices(["KEYBOARD-X"]);

    h.session.handle(UiEvent::ScanDevices);

    assert!(h.notifier.messages().is_empty());
    assert_eq!(h.host.commands(), vec![HostCommand::EnableTextInput]);
}

#[test]
fn test_enumeration_outage_reads_as_all_devices_gone() {
    // Arrange
    let mut h = harness();
    h.devices.set_devices(["USB Keyboard", "Mouse"]);
    h.session.handle(UiEvent::ScanDevices);

    // Act
    h.devices.set_unavailable();
    h.session.handle(UiEvent::ScanDevices);

    // Assert
    assert!(!h.session.hardware_keyboard_present());
    assert_eq!(
        h.notifier.messages().last().map(String::as_str),
        Some("Disconnected:\nMouse\nUSB Keyboard")
    );
    assert_eq!(h.host.count(HostCommand::DisableTextInput), 1);
}

#[test]
fn test_devices_seen_after_startup_outage_are_detected() {
    let mut h = harness();
    h.devices.set_unavailable();
    h.session.handle(UiEvent::ScanDevices);

    h.devices.set_devices(["Mouse"]);
    h.session.handle(UiEvent::ScanDevices);

    assert_eq!(h.notifier.messages(), vec!["Detected:\nMouse".to_string()]);
}

#[test]
fn test_unchanged_scans_are_silent() {
    let mut h = harness();
    h.devices.set_devices(["USB Keyboard"]);
    h.session.handle(UiEvent::ScanDevices);
    let before_commands = h.host.commands().len();
    let before_messages = h.notifier.messages().len();

    for _ in 0..5 {
        h.session.handle(UiEvent::ScanDevices);
    }

    assert_eq!(h.host.commands().len(), before_commands);
    assert_eq!(h.notifier.messages().len(), before_messages);
    assert_eq!(h.session.device_scans(), 6);
}

// ── Soft input scenarios ──────────────────────────────────────────────────────

#[test]
fn test_keyboard_open_then_close_round_trip() {
    let mut h = harness();

    // Act: open
    h.session.handle(geometry(1000, 1000));
    h.session.handle(geometry(800, 1000));

    // Assert: visible, relaxed, focus kept
    assert_eq!(h.session.keyboard_visibility(), KeyboardVisibilityState::Visible);
    assert_eq!(
        h.host.commands(),
        vec![
            HostCommand::SetChromeMode(DisplayChromeMode::Relaxed),
            HostCommand::RequestSoftInputFocus,
        ]
    );
    h.host.clear();

    // Act: close
    h.session.handle(geometry(1000, 1000));

    // Assert: native told first, then immersive re-asserted
    assert_eq!(h.session.keyboard_visibility(), KeyboardVisibilityState::Hidden);
    assert_eq!(
        h.host.commands(),
        vec![
            HostCommand::KeyboardClosed,
            HostCommand::SetChromeMode(DisplayChromeMode::Immersive),
        ]
    );
}

#[test]
fn test_exact_threshold_does_not_open_keyboard() {
    let mut h = harness();

    h.session.handle(geometry(850, 1000));

    assert_eq!(h.session.keyboard_visibility(), KeyboardVisibilityState::Hidden);
    assert!(h.host.commands().is_empty());
}

#[test]
fn test_degenerate_geometry_is_ignored() {
    let mut h = harness();
    h.session.handle(geometry(800, 1000));
    h.host.clear();

    h.session.handle(geometry(0, 0));
    h.session.handle(geometry(1200, 1000));
    h.session.handle(geometry(-1, 1000));

    assert_eq!(h.session.keyboard_visibility(), KeyboardVisibilityState::Visible);
    assert!(h.host.commands().is_empty());
}

// ── Enforcement and lifecycle ─────────────────────────────────────────────────

#[test]
fn test_enforce_twice_is_same_observable_mode() {
    let mut h = harness();

    h.session.handle(UiEvent::EnforceDisplay);
    let first = h.host.current_mode();
    h.session.handle(UiEvent::EnforceDisplay);

    assert_eq!(first, Some(DisplayChromeMode::Immersive));
    assert_eq!(h.host.current_mode(), first);
    assert_eq!(
        h.host.count(HostCommand::SetChromeMode(DisplayChromeMode::Immersive)),
        2
    );
}

#[test]
fn test_emulation_start_is_not_undone_by_next_enforcement_tick() {
    // Arrange: soft keyboard open
    let mut h = harness();
    h.session.handle(geometry(800, 1000));

    // Act
    h.session.handle(UiEvent::EmulationStart);
    h.session.handle(UiEvent::EnforceDisplay);
    h.session.handle(UiEvent::EnforceDisplay);

    // Assert: nothing after the dismissal relaxes chrome or refocuses the panel
    let commands = h.host.commands();
    let dismissed_at = commands
        .iter()
        .position(|c| *c == HostCommand::DismissSoftInput)
        .expect("panel dismissed");
    let after = &commands[dismissed_at + 1..];
    assert!(!after.contains(&HostCommand::SetChromeMode(DisplayChromeMode::Relaxed)));
    assert!(!after.contains(&HostCommand::RequestSoftInputFocus));
    assert!(!after.contains(&HostCommand::KeyboardClosed));
    assert_eq!(h.host.current_mode(), Some(DisplayChromeMode::Immersive));
}

#[test]
fn test_keyboard_reopened_after_emulation_start_relaxes_again() {
    let mut h = harness();
    h.session.handle(geometry(800, 1000));
    h.session.handle(UiEvent::EmulationStart);
    h.host.clear();

    h.session.handle(geometry(700, 1000));

    assert_eq!(h.session.keyboard_visibility(), KeyboardVisibilityState::Visible);
    assert_eq!(h.host.current_mode(), Some(DisplayChromeMode::Relaxed));
}

#[test]
fn test_emulation_end_restores_physical_keyboard_routing() {
    // Arrange
    let mut h = harness();
    h.devices.set_devices(["USB Keyboard"]);
    h.session.handle(UiEvent::ScanDevices);
    h.session.handle(UiEvent::EmulationStart);
    h.host.clear();

    // Act
    h.session.handle(UiEvent::EmulationEnd);

    // Assert
    assert_eq!(h.host.commands(), vec![HostCommand::EnableTextInput]);
}

#[test]
fn test_emulation_end_without_keyboard_is_silent() {
    let mut h = harness();

    h.session.handle(UiEvent::EmulationEnd);

    assert!(h.host.commands().is_empty());
}

// ── Scheduled run ─────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_scheduled_session_picks_up_keyboard_and_enforces() {
    // Arrange
    let h = harness();
    h.devices.set_devices(["USB Keyboard"]);
    let (tx, rx) = mpsc::channel(32);
    let dispatcher = tokio::spawn(h.session.run(rx));

    let scan = PeriodicTask::spawn(
        "scan",
        Duration::from_millis(1000),
        tx.clone(),
        UiEvent::ScanDevices,
    );
    let enforce = PeriodicTask::spawn(
        "enforce",
        Duration::from_millis(500),
        tx.clone(),
        UiEvent::EnforceDisplay,
    );
    drop(tx);

    // Act
    tokio::time::sleep(Duration::from_millis(1250)).await;
    scan.stop().await;
    enforce.stop().await;
    let session = dispatcher.await.unwrap();

    // Assert
    assert!(session.hardware_keyboard_present());
    assert_eq!(h.host.count(HostCommand::EnableTextInput), 1);
    assert!(h.host.count(HostCommand::SetChromeMode(DisplayChromeMode::Immersive)) >= 3);
    assert!(session.device_scans() >= 2);
}
