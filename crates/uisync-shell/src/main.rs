//! UiSync shell: entry point.
//!
//! Runs the runtime UI-state reconciliation loop headlessly:
//!
//! - scans attached input devices on a coarse schedule and reports changes,
//! - re-asserts the display chrome mode on a fine schedule,
//! - reads host layout and emulation lifecycle events from a text feed
//!   (stdin by default, see `infrastructure::geometry_feed` for the format).
//!
//! Host and native-core commands are emitted as `tracing` events.
//!
//! # Usage
//!
//! ```text
//! uisync-shell [OPTIONS]
//!
//! Options:
//!   --config <PATH>               Config file [default: platform config dir]
//!   --scan-interval-ms <MS>       Device scan period
//!   --enforce-interval-ms <MS>    Display enforcement period
//!   --log-level <LEVEL>           Log level when RUST_LOG is unset
//!   --feed <PATH>                 Event feed; `-` is stdin [default: -]
//!   --no-feed                     Do not read an event feed
//!   --quiet-first-scan            No notification for devices present at startup
//!   --write-config                Write the effective config file and exit
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                     | Flag                    |
//! |------------------------------|-------------------------|
//! | `UISYNC_CONFIG`              | `--config`              |
//! | `UISYNC_SCAN_INTERVAL_MS`    | `--scan-interval-ms`    |
//! | `UISYNC_ENFORCE_INTERVAL_MS` | `--enforce-interval-ms` |
//! | `UISYNC_LOG_LEVEL`           | `--log-level`           |
//!
//! Precedence: CLI flag, then environment variable, then config file, then
//! built-in default.  `RUST_LOG` overrides the log level entirely.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::{io::BufReader, sync::mpsc, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use uisync_shell::application::session::{SessionOptions, SessionPorts, UiEvent, UiSession};
use uisync_shell::infrastructure::{
    device_enumeration::native_enumerator,
    geometry_feed::spawn_feed,
    host::LoggingHost,
    notifier::TracingNotifier,
    scheduler::PeriodicTask,
    storage::config::{self, AppConfig, ConfigError},
};

/// Capacity of the session event channel.
const EVENT_QUEUE_DEPTH: usize = 64;

/// Grace period for blocking readers (stdin) when the runtime shuts down.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

// ── CLI argument definitions ──────────────────────────────────────────────────

/// UiSync runtime UI-state reconciliation shell.
#[derive(Debug, Parser)]
#[command(
    name = "uisync-shell",
    about = "Keeps display chrome and keyboard routing in step with attached devices and soft input",
    version
)]
struct Cli {
    /// Config file to read instead of the platform default.
    #[arg(long, env = "UISYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Device scan period in milliseconds.
    #[arg(long, env = "UISYNC_SCAN_INTERVAL_MS")]
    scan_interval_ms: Option<u64>,

    /// Display enforcement period in milliseconds.
    #[arg(long, env = "UISYNC_ENFORCE_INTERVAL_MS")]
    enforce_interval_ms: Option<u64>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "UISYNC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Event feed to read; `-` reads stdin.
    #[arg(long, default_value = "-")]
    feed: String,

    /// Run without an event feed.
    #[arg(long, conflicts_with = "feed")]
    no_feed: bool,

    /// Suppress the "Detected:" notification for devices present at startup.
    #[arg(long)]
    quiet_first_scan: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Layers the CLI values over `config`.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ms) = self.scan_interval_ms {
            config.schedule.device_scan_interval_ms = ms;
        }
        if let Some(ms) = self.enforce_interval_ms {
            config.schedule.display_enforce_interval_ms = ms;
        }
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if self.quiet_first_scan {
            config.devices.notify_on_first_scan = false;
        }
    }

    fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config::config_file_path(),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// The runtime is built by hand instead of via `#[tokio::main]` so shutdown
/// can bound the wait on a stdin read that is still parked in the blocking
/// pool.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the async runtime")?;

    let result = runtime.block_on(run(cli));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // ── Configuration ─────────────────────────────────────────────────────────
    //
    // Resolved before logging so the configured level can seed the filter.
    // Problems found here are reported once the subscriber exists.
    let (mut app_config, config_note) = match cli.config_path() {
        Ok(path) => {
            let cfg = config::load_config_from(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            (cfg, None)
        }
        Err(e) => (AppConfig::default(), Some(e)),
    };
    cli.apply_overrides(&mut app_config);
    app_config.schedule.validate().context("invalid schedule")?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the configured level applies.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.general.log_level)),
        )
        .init();

    if let Some(e) = config_note {
        warn!("{e}; using built-in configuration");
    }

    if cli.write_config {
        let path = cli.config_path().context("no config path to write to")?;
        config::save_config_to(&app_config, &path)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        info!("wrote configuration to {}", path.display());
        return Ok(());
    }

    info!(
        scan_ms = app_config.schedule.device_scan_interval_ms,
        enforce_ms = app_config.schedule.display_enforce_interval_ms,
        "UiSync shell starting"
    );

    // ── Session wiring ────────────────────────────────────────────────────────
    let host = Arc::new(LoggingHost::new());
    let ports = SessionPorts {
        enumerator: native_enumerator(),
        notifier: Arc::new(TracingNotifier),
        host: host.clone(),
        text_input: host.clone(),
        keyboard_sink: host,
    };
    let session = UiSession::new(
        ports,
        SessionOptions {
            notify_on_first_scan: app_config.devices.notify_on_first_scan,
        },
    );

    let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let dispatcher = tokio::spawn(session.run(rx));

    // ── Event sources ─────────────────────────────────────────────────────────
    let scan_task = PeriodicTask::spawn(
        "device-scan",
        app_config.schedule.device_scan_interval(),
        tx.clone(),
        UiEvent::ScanDevices,
    );
    let enforce_task = PeriodicTask::spawn(
        "display-enforce",
        app_config.schedule.display_enforce_interval(),
        tx.clone(),
        UiEvent::EnforceDisplay,
    );
    let feed = if cli.no_feed {
        None
    } else {
        Some(open_feed(&cli.feed, tx.clone()).await?)
    };
    // Only the event sources hold senders from here on.
    drop(tx);

    info!("UiSync shell ready.  Press Ctrl-C to exit.");

    // ── Shutdown ──────────────────────────────────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("shutdown signal received");

    scan_task.cancel();
    enforce_task.cancel();
    if let Some(feed) = &feed {
        feed.abort();
    }
    let scans_sent = scan_task.stop().await;
    let enforces_sent = enforce_task.stop().await;

    let session = dispatcher.await.context("session dispatcher failed")?;
    info!(
        scans_sent,
        enforces_sent,
        device_scans = session.device_scans(),
        "UiSync shell stopped"
    );
    Ok(())
}

/// Starts the event feed from `source` (`-` for stdin).
async fn open_feed(source: &str, tx: mpsc::Sender<UiEvent>) -> anyhow::Result<JoinHandle<u64>> {
    if source == "-" {
        info!("reading events from stdin");
        return Ok(spawn_feed(BufReader::new(tokio::io::stdin()), tx));
    }

    let file = tokio::fs::File::open(source)
        .await
        .with_context(|| format!("failed to open event feed {source}"))?;
    info!("reading events from {source}");
    Ok(spawn_feed(BufReader::new(file), tx))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
