//! Per-entry outcomes and the per-pass report
//!
//! Each entry visited during a pass produces exactly one [`SyncOutcome`].
//! Outcomes flow to the reporter port for logging and are aggregated into
//! a [`PassReport`]; nothing is retained across passes.

use std::path::PathBuf;

use serde::Serialize;

use super::errors::SyncError;

/// The result of handling a single entry during a sync pass
#[derive(Debug)]
pub enum SyncOutcome {
    /// A file was copied (created or overwritten) to the replica
    Copied {
        /// The source file
        source: PathBuf,
        /// The replica file that was written
        replica: PathBuf,
    },
    /// A missing replica directory was created
    CreatedDir {
        /// The replica directory that was created
        replica: PathBuf,
    },
    /// A replica file with no source counterpart was removed
    Removed {
        /// The replica file that was removed
        replica: PathBuf,
    },
    /// An empty replica directory with no source counterpart was removed
    RemovedDir {
        /// The replica directory that was removed
        replica: PathBuf,
    },
    /// The replica file is already up to date (no copy performed)
    SkippedUpToDate {
        /// The source file that needed no copy
        source: PathBuf,
    },
    /// The entry (or, for fatal errors, the whole pass) failed
    Failed(SyncError),
}

impl SyncOutcome {
    /// Whether this outcome represents a failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Human-readable description, used verbatim as the log message
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Copied { source, replica } => {
                format!("Copied {} to {}", source.display(), replica.display())
            }
            Self::CreatedDir { replica } => {
                format!("Created directory {}", replica.display())
            }
            Self::Removed { replica } => format!("Removed {}", replica.display()),
            Self::RemovedDir { replica } => {
                format!("Removed directory {}", replica.display())
            }
            Self::SkippedUpToDate { source } => {
                format!("Up to date: {}", source.display())
            }
            Self::Failed(err) => err.to_string(),
        }
    }
}

/// Summary of one completed sync pass
///
/// Mirrors the shape a caller needs to decide whether the pass converged:
/// counters per outcome class, the error messages encountered, and the
/// wall-clock duration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassReport {
    /// Number of files copied to the replica
    pub files_copied: u64,
    /// Number of replica directories created
    pub dirs_created: u64,
    /// Number of replica files removed
    pub files_removed: u64,
    /// Number of replica directories removed
    pub dirs_removed: u64,
    /// Number of files already up to date
    pub files_up_to_date: u64,
    /// Errors encountered during the pass (non-fatal and fatal alike)
    pub errors: Vec<String>,
    /// Wall-clock duration of the pass in milliseconds
    pub duration_ms: u64,
}

impl PassReport {
    /// Fold one outcome into the counters
    pub fn record(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Copied { .. } => self.files_copied += 1,
            SyncOutcome::CreatedDir { .. } => self.dirs_created += 1,
            SyncOutcome::Removed { .. } => self.files_removed += 1,
            SyncOutcome::RemovedDir { .. } => self.dirs_removed += 1,
            SyncOutcome::SkippedUpToDate { .. } => self.files_up_to_date += 1,
            SyncOutcome::Failed(err) => self.errors.push(err.to_string()),
        }
    }

    /// Total number of replica mutations performed by the pass
    #[must_use]
    pub fn mutations(&self) -> u64 {
        self.files_copied + self.dirs_created + self.files_removed + self.dirs_removed
    }

    /// Whether any failure occurred during the pass
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
