//! Scheduler - fixed-interval pass loop
//!
//! Runs one pass, sleeps the configured interval, repeats. Passes never
//! overlap: the next interval only starts counting after a pass has fully
//! completed. Shutdown is signalled through a [`CancellationToken`] and
//! takes effect between passes; a pass already running is not interrupted
//! (it leaves the replica partially converged but safe, repaired by the
//! next process start).
//!
//! The pass itself is synchronous blocking I/O, so it runs on the
//! blocking thread pool and the loop stays responsive to cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use dirmirror_core::domain::PassReport;
use dirmirror_core::ports::SyncReporter;

use crate::engine::SyncEngine;

/// Drives [`SyncEngine::run_pass`] at a fixed interval until cancelled
pub struct Scheduler {
    /// Time to wait between the end of one pass and the start of the next
    interval: Duration,
    /// Token signalling graceful shutdown
    shutdown: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler with the given inter-pass interval
    #[must_use]
    pub fn new(interval: Duration, shutdown: CancellationToken) -> Self {
        Self { interval, shutdown }
    }

    /// Run passes forever, sleeping `interval` between them
    ///
    /// The first pass starts immediately. Returns when the shutdown
    /// token is cancelled.
    pub async fn run(&self, engine: Arc<SyncEngine>, reporter: Arc<dyn SyncReporter>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting sync loop"
        );

        loop {
            Self::run_single_pass(Arc::clone(&engine), Arc::clone(&reporter)).await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Sync loop terminated");
    }

    /// Run exactly one pass on the blocking thread pool
    ///
    /// Used by the loop and by the CLI's single-pass mode.
    pub async fn run_single_pass(
        engine: Arc<SyncEngine>,
        reporter: Arc<dyn SyncReporter>,
    ) -> Option<PassReport> {
        let result =
            tokio::task::spawn_blocking(move || engine.run_pass(reporter.as_ref())).await;

        match result {
            Ok(report) => Some(report),
            Err(err) => {
                error!(error = %err, "Sync pass task failed");
                None
            }
        }
    }
}
