//! Domain error types
//!
//! One variant per failure class. The first two are fatal to a pass (the
//! pass is skipped, the scheduler continues at the next interval); the
//! entry-level variants are local to one entry and never abort a walk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while mirroring one tree onto another
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source root was missing at the start of a pass (fatal to the pass)
    #[error("Source folder '{}' does not exist", .0.display())]
    MissingSourceRoot(PathBuf),

    /// The replica root could not be created (fatal to the pass)
    #[error("Error creating replica folder '{}': {source}", .path.display())]
    ReplicaCreationFailure {
        /// The replica root that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A single file could not be copied to the replica
    #[error("Error copying file '{}': {source}", .path.display())]
    EntryCopyFailure {
        /// The source file that failed to copy
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single replica directory could not be created
    #[error("Error creating directory '{}': {source}", .path.display())]
    EntryCreateDirFailure {
        /// The replica directory that failed to be created
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single replica file could not be removed
    #[error("Error removing file '{}': {source}", .path.display())]
    EntryRemoveFailure {
        /// The replica file that failed to be removed
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single replica directory could not be removed
    ///
    /// Typically the directory is still non-empty because a child entry
    /// failed to delete; it is retried on the next pass.
    #[error("Error removing directory '{}': {source}", .path.display())]
    EntryRemoveDirFailure {
        /// The replica directory that failed to be removed
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry path produced by a walk was not under the walked root
    ///
    /// This is an invariant guard, not a recoverable condition: a correct
    /// traversal only yields paths under its root.
    #[error("Path '{}' is not under root '{}'", .path.display(), .root.display())]
    PathNotUnderRoot {
        /// The offending entry path
        path: PathBuf,
        /// The root it was expected to be under
        root: PathBuf,
    },

    /// A tree root failed validation at construction time
    #[error("Invalid tree root: {0}")]
    InvalidRoot(String),
}

impl SyncError {
    /// Whether this error aborts the whole pass rather than one entry
    #[must_use]
    pub fn is_fatal_to_pass(&self) -> bool {
        matches!(
            self,
            Self::MissingSourceRoot(_) | Self::ReplicaCreationFailure { .. }
        )
    }
}
