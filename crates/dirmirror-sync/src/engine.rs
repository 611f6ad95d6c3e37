//! Sync engine - one copy-then-prune pass over the pair of trees
//!
//! ## Pass Flow
//!
//! 1. **Pre-checks**: source root must exist (abort the pass otherwise);
//!    replica root is created if absent
//! 2. **Copy stage**: walk the source, create/update replica entries
//! 3. **Prune stage**: walk the replica bottom-up, remove orphans
//!
//! Every outcome goes to the [`SyncReporter`] as it happens and is folded
//! into the returned [`PassReport`]. There is no transactionality: a pass
//! over trees being modified externally is best-effort, and the next pass
//! repairs whatever it left behind. There is also no retry within a pass;
//! the retry strategy is the fixed-interval re-run.

use std::fs;
use std::time::Instant;

use tracing::{error, info};

use dirmirror_core::config::SyncConfig;
use dirmirror_core::domain::{PassReport, SyncError, SyncOutcome, TreeRoot};
use dirmirror_core::ports::SyncReporter;

use crate::copy::CopyStage;
use crate::prune::PruneStage;

/// One-way mirroring engine over a fixed pair of roots
///
/// Holds only the two roots; all other state is re-derived from the
/// filesystem on every pass, so repeated passes with an unchanged source
/// are pure no-ops.
pub struct SyncEngine {
    source_root: TreeRoot,
    replica_root: TreeRoot,
}

impl SyncEngine {
    /// Create an engine for the configured pair of roots
    #[must_use]
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            source_root: config.source_root.clone(),
            replica_root: config.replica_root.clone(),
        }
    }

    /// Create an engine directly from two roots
    #[must_use]
    pub fn with_roots(source_root: TreeRoot, replica_root: TreeRoot) -> Self {
        Self {
            source_root,
            replica_root,
        }
    }

    /// Run one complete copy-then-prune pass
    ///
    /// Never returns an error: fatal pre-pass conditions become a single
    /// `Failed` outcome and an aborted pass, entry-level failures are
    /// reported and skipped. The process-level loop is unaffected either
    /// way.
    #[tracing::instrument(skip(self, reporter), fields(source = %self.source_root, replica = %self.replica_root))]
    pub fn run_pass(&self, reporter: &dyn SyncReporter) -> PassReport {
        let start = Instant::now();
        let mut report = PassReport::default();

        info!("Starting sync pass");

        {
            let mut emit = |outcome: SyncOutcome| {
                reporter.record(&outcome);
                report.record(&outcome);
            };

            // Pre-check: the source root must exist, checked once up
            // front. Nothing in the replica is touched when it is gone.
            if !self.source_root.exists() {
                emit(SyncOutcome::Failed(SyncError::MissingSourceRoot(
                    self.source_root.as_path().to_path_buf(),
                )));
            } else if let Err(err) = fs::create_dir_all(self.replica_root.as_path()) {
                emit(SyncOutcome::Failed(SyncError::ReplicaCreationFailure {
                    path: self.replica_root.as_path().to_path_buf(),
                    source: err,
                }));
            } else {
                CopyStage::new(self.source_root.as_path(), self.replica_root.as_path())
                    .run(&mut emit);
                PruneStage::new(self.source_root.as_path(), self.replica_root.as_path())
                    .run(&mut emit);
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        if report.has_errors() {
            error!(
                copied = report.files_copied,
                removed = report.files_removed,
                errors = report.errors.len(),
                duration_ms = report.duration_ms,
                "Sync pass completed with errors"
            );
        } else {
            info!(
                copied = report.files_copied,
                dirs_created = report.dirs_created,
                removed = report.files_removed,
                dirs_removed = report.dirs_removed,
                up_to_date = report.files_up_to_date,
                duration_ms = report.duration_ms,
                "Sync pass completed"
            );
        }

        report
    }
}
