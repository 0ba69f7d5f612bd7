//! Periodic event sources.
//!
//! A [`PeriodicTask`] posts the same event onto the session channel at a
//! fixed period using a "run, sleep, repeat" loop: the first event is sent
//! immediately, then once per period.  The loop re-checks a shared `running`
//! flag before every send, so cancelling takes effect within one period and
//! never produces another event once observed.
//!
//! The task also stops by itself when the receiving side of the channel is
//! dropped.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};
use tracing::{debug, trace};

/// A cancellable fixed-period event source.
pub struct PeriodicTask {
    name: &'static str,
    running: Arc<AtomicBool>,
    handle: JoinHandle<u64>,
}

impl PeriodicTask {
    /// Spawns a task that sends a clone of `event` on `tx` every `period`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<T>(name: &'static str, period: Duration, tx: mpsc::Sender<T>, event: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = tokio::spawn(async move {
            let mut sent = 0u64;
            debug!(task = name, ?period, "periodic task started");
            while flag.load(Ordering::Relaxed) {
                if tx.send(event.clone()).await.is_err() {
                    debug!(task = name, "receiver dropped");
                    break;
                }
                sent += 1;
                trace!(task = name, sent, "tick");
                time::sleep(period).await;
            }
            debug!(task = name, sent, "periodic task stopped");
            sent
        });

        Self {
            name,
            running,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stops the loop before its next send.  Idempotent.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::Relaxed)
    }

    /// Cancels the task and waits for it to finish.  Returns the number of
    /// events it sent.
    ///
    /// The loop may be parked in its sleep; the wait is bounded by one period.
    pub async fn stop(self) -> u64 {
        self.cancel();
        // A join error only happens if the task panicked or was aborted.
        self.handle.await.unwrap_or(0)
    }
}
