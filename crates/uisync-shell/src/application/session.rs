//! UiSession: the single-threaded dispatcher that owns all four components.
//!
//! Every driving signal (device-scan tick, enforcement tick, geometry change,
//! emulation lifecycle hook) arrives as a [`UiEvent`] on one channel and is
//! handled to completion before the next one is looked at.  That gives the
//! same guarantees as running everything on a single UI thread: the device
//! snapshot, keyboard visibility, and hardware-keyboard flag are each owned
//! by exactly one component and are never touched concurrently.
//!
//! Components never hold references to each other.  Cross-component effects
//! are routed here:
//!
//! ```text
//! ScanDevices      -> tracker.scan_attached() -> routing.on_device_diff()
//!                                             -> [Enforce] enforcer.enforce(visibility)
//! GeometryChanged  -> monitor.on_geometry_changed() -> [transition] enforcer.enforce(visibility)
//! EnforceDisplay   -> enforcer.enforce(visibility)
//! EmulationStart   -> routing.on_emulation_start() -> monitor.assume_hidden()
//!                                                  -> enforcer.force_immersive()
//! EmulationEnd     -> routing.on_emulation_end()
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};
use uisync_core::{DeviceDiff, DisplayChromeMode, KeyboardVisibilityState};

use super::{
    enforce_display::{DisplayModeEnforcer, HostDisplay},
    route_input::{DisplayFollowUp, InputRoutingController, NativeTextInput},
    soft_input::{SoftInputVisibilityMonitor, SoftKeyboardSink},
    track_devices::{DeviceEnumerator, DeviceInventoryTracker, Notifier},
};

/// A signal delivered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Coarse periodic tick: enumerate and diff attached devices.
    ScanDevices,
    /// Fine periodic tick: re-assert the display chrome mode.
    EnforceDisplay,
    /// The host's layout observer reported new window geometry.
    GeometryChanged {
        visible_frame_height: i32,
        total_screen_height: i32,
    },
    /// The emulator is about to start running a program.
    EmulationStart,
    /// The emulator stopped running a program.
    EmulationEnd,
}

/// The outbound collaborators a session talks to.
///
/// The same adapter commonly implements several of these traits; pass clones
/// of one `Arc` in that case.
#[derive(Clone)]
pub struct SessionPorts {
    pub enumerator: Arc<dyn DeviceEnumerator>,
    pub notifier: Arc<dyn Notifier>,
    pub host: Arc<dyn HostDisplay>,
    pub text_input: Arc<dyn NativeTextInput>,
    pub keyboard_sink: Arc<dyn SoftKeyboardSink>,
}

/// Session-level behaviour switches.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Show the "Detected:" notification for devices present at startup.
    pub notify_on_first_scan: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            notify_on_first_scan: true,
        }
    }
}

/// Owns the tracker, monitor, enforcer and routing controller.
pub struct UiSession {
    tracker: DeviceInventoryTracker,
    monitor: SoftInputVisibilityMonitor,
    enforcer: DisplayModeEnforcer,
    routing: InputRoutingController,
}

impl UiSession {
    pub fn new(ports: SessionPorts, options: SessionOptions) -> Self {
        Self {
            tracker: DeviceInventoryTracker::new(ports.enumerator, ports.notifier)
                .with_first_scan_notification(options.notify_on_first_scan),
            monitor: SoftInputVisibilityMonitor::new(ports.keyboard_sink),
            enforcer: DisplayModeEnforcer::new(ports.host),
            routing: InputRoutingController::new(ports.text_input),
        }
    }

    /// Handles one event to completion.
    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::ScanDevices => {
                self.scan_devices();
            }
            UiEvent::EnforceDisplay => {
                self.enforce();
            }
            UiEvent::GeometryChanged {
                visible_frame_height,
                total_screen_height,
            } => {
                if self
                    .monitor
                    .on_geometry_changed(visible_frame_height, total_screen_height)
                    .is_some()
                {
                    // Forced: do not wait for the next enforcement tick.
                    self.enforce();
                }
            }
            UiEvent::EmulationStart => {
                let follow_up = self.routing.on_emulation_start();
                self.apply(follow_up);
            }
            UiEvent::EmulationEnd => {
                let follow_up = self.routing.on_emulation_end();
                self.apply(follow_up);
            }
        }
    }

    /// Drains `events` until every sender is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> Self {
        info!("ui session started");
        while let Some(event) = events.recv().await {
            debug!(?event, "dispatching");
            self.handle(event);
        }
        info!("ui session stopped");
        self
    }

    /// Runs one device scan and routes the result.  Returns the diff.
    pub fn scan_devices(&mut self) -> DeviceDiff {
        let diff = self.tracker.scan_attached();
        let follow_up = self.routing.on_device_diff(&diff);
        self.apply(follow_up);
        diff
    }

    fn enforce(&mut self) -> DisplayChromeMode {
        self.enforcer.enforce(self.monitor.state())
    }

    fn apply(&mut self, follow_up: DisplayFollowUp) {
        match follow_up {
            DisplayFollowUp::None => {}
            DisplayFollowUp::Enforce => {
                self.enforce();
            }
            DisplayFollowUp::ForceImmersive => {
                // The panel is being dismissed; later ticks must not reopen it.
                self.monitor.assume_hidden();
                self.enforcer.force_immersive();
            }
        }
    }

    pub fn keyboard_visibility(&self) -> KeyboardVisibilityState {
        self.monitor.state()
    }

    pub fn hardware_keyboard_present(&self) -> bool {
        self.routing.hardware_keyboard_present()
    }

    pub fn display_mode(&self) -> Option<DisplayChromeMode> {
        self.enforcer.last_applied()
    }

    pub fn device_scans(&self) -> u64 {
        self.tracker.scans()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        device_enumeration::mock::ScriptedDeviceEnumerator,
        host::mock::{HostCommand, RecordingHost},
        notifier::RecordingNotifier,
    };

    struct Fixture {
        session: UiSession,
        devices: Arc<ScriptedDeviceEnumerator>,
        host: Arc<RecordingHost>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture() -> Fixture {
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
        Fixture {
            session: UiSession::new(ports, SessionOptions::default()),
            devices,
            host,
            notifier,
        }
    }

    #[test]
    fn test_enforce_tick_applies_immersive_when_keyboard_hidden() {
        let mut f = fixture();

        f.session.handle(UiEvent::EnforceDisplay);

        assert_eq!(
            f.host.commands(),
            vec![HostCommand::SetChromeMode(DisplayChromeMode::Immersive)]
        );
    }

    #[test]
    fn test_geometry_open_forces_relaxed_enforcement() {
        let mut f = fixture();

        f.session.handle(UiEvent::GeometryChanged {
            visible_frame_height: 800,
            total_screen_height: 1000,
        });

        assert_eq!(f.session.keyboard_visibility(), KeyboardVisibilityState::Visible);
        assert_eq!(
            f.host.commands(),
            vec![
                HostCommand::SetChromeMode(DisplayChromeMode::Relaxed),
                HostCommand::RequestSoftInputFocus,
            ]
        );
    }

    #[test]
    fn test_geometry_without_transition_issues_nothing() {
        let mut f = fixture();

        f.session.handle(UiEvent::GeometryChanged {
            visible_frame_height: 1000,
            total_screen_height: 1000,
        });

        assert!(f.host.commands().is_empty());
    }

    #[test]
    fn test_scan_routes_keyboard_arrival_to_native_core() {
        let mut f = fixture();
        f.devices.set_devices(["USB Keyboard"]);

        f.session.handle(UiEvent::ScanDevices);

        assert!(f.session.hardware_keyboard_present());
        assert_eq!(f.host.commands(), vec![HostCommand::EnableTextInput]);
        assert_eq!(f.notifier.messages(), vec!["Detected:\nUSB Keyboard".to_string()]);
    }

    #[test]
    fn test_emulation_start_dismisses_and_goes_immersive() {
        let mut f = fixture();

        f.session.handle(UiEvent::EmulationStart);

        assert_eq!(
            f.host.commands(),
            vec![
                HostCommand::DismissSoftInput,
                HostCommand::SetChromeMode(DisplayChromeMode::Immersive),
            ]
        );
    }

    #[test]
    fn test_enforce_after_emulation_start_keeps_panel_dismissed() {
        // Arrange: soft keyboard open
        let mut f = fixture();
        f.session.handle(UiEvent::GeometryChanged {
            visible_frame_height: 800,
            total_screen_height: 1000,
        });
        f.host.clear();

        // Act
        f.session.handle(UiEvent::EmulationStart);
        f.session.handle(UiEvent::EnforceDisplay);

        // Assert
        assert_eq!(f.session.keyboard_visibility(), KeyboardVisibilityState::Hidden);
        assert_eq!(
            f.host.commands(),
            vec![
                HostCommand::DismissSoftInput,
                HostCommand::SetChromeMode(DisplayChromeMode::Immersive),
                HostCommand::SetChromeMode(DisplayChromeMode::Immersive),
            ]
        );
    }

    #[tokio::test]
    async fn test_run_drains_events_in_order_until_channel_closes() {
        // Arrange
        let f = fixture();
        let (tx, rx) = mpsc::channel(8);
        tx.send(UiEvent::GeometryChanged {
            visible_frame_height: 700,
            total_screen_height: 1000,
        })
        .await
        .unwrap();
        tx.send(UiEvent::EnforceDisplay).await.unwrap();
        drop(tx);

        // Act
        let session = f.session.run(rx).await;

        // Assert
        assert_eq!(session.display_mode(), Some(DisplayChromeMode::Relaxed));
        assert_eq!(f.host.commands().len(), 4);
    }
}
