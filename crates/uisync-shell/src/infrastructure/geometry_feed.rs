//! Line-oriented source of host layout and lifecycle events.
//!
//! The headless binary has no window to observe, so the host's layout
//! callback and the emulator lifecycle hooks are fed in as text, one event
//! per line:
//!
//! | Line            | Event                                   |
//! |-----------------|-----------------------------------------|
//! | `800 1000`      | `GeometryChanged { 800, 1000 }`         |
//! | `start`         | `EmulationStart`                        |
//! | `end`           | `EmulationEnd`                          |
//! | `scan`          | `ScanDevices` (out-of-schedule scan)    |
//! | `enforce`       | `EnforceDisplay` (out-of-schedule tick) |
//! | blank, `# ...`  | ignored                                 |
//!
//! Malformed lines are logged and skipped; they never stop the feed.

use thiserror::Error;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::application::session::UiEvent;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryFeedError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("expected `<visible_height> <total_height>`, got {0:?}")]
    WrongArity(String),

    #[error("invalid height {value:?}: {reason}")]
    InvalidHeight { value: String, reason: String },
}

/// Parses one feed line.  `Ok(None)` for blank and comment lines.
pub fn parse_feed_line(line: &str) -> Result<Option<UiEvent>, GeometryFeedError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [word] if word.parse::<i32>().is_err() => match word.to_ascii_lowercase().as_str() {
            "start" => Ok(Some(UiEvent::EmulationStart)),
            "end" => Ok(Some(UiEvent::EmulationEnd)),
            "scan" => Ok(Some(UiEvent::ScanDevices)),
            "enforce" => Ok(Some(UiEvent::EnforceDisplay)),
            _ => Err(GeometryFeedError::UnknownCommand(word.to_string())),
        },
        [visible, total] => Ok(Some(UiEvent::GeometryChanged {
            visible_frame_height: parse_height(visible)?,
            total_screen_height: parse_height(total)?,
        })),
        _ => Err(GeometryFeedError::WrongArity(line.to_string())),
    }
}

fn parse_height(value: &str) -> Result<i32, GeometryFeedError> {
    value
        .parse::<i32>()
        .map_err(|e| GeometryFeedError::InvalidHeight {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Reads `reader` line by line and forwards each parsed event on `tx`.
///
/// The task ends at end of input, on a read error, or when the receiver is
/// dropped.  Returns the number of events forwarded.
pub fn spawn_feed<R>(reader: R, tx: mpsc::Sender<UiEvent>) -> JoinHandle<u64>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        let mut forwarded = 0u64;
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!(forwarded, "geometry feed reached end of input");
                    break;
                }
                Err(e) => {
                    warn!("geometry feed read failed: {e}");
                    break;
                }
            };

            match parse_feed_line(&line) {
                Ok(Some(event)) => {
                    if tx.send(event).await.is_err() {
                        debug!("geometry feed receiver dropped");
                        break;
                    }
                    forwarded += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("skipping feed line: {e}"),
            }
        }
        forwarded
    })
}
