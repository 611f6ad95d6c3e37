//! Prune stage - walk the replica bottom-up, remove entries the source
//! no longer has
//!
//! Descendants are visited before their directory is evaluated, so an
//! entire removed subtree disappears within a single pass. Directories
//! are removed with the non-recursive `remove_dir` only: if a child
//! failed to delete the directory is still non-empty, the removal fails,
//! one error is logged, and the directory survives to the next pass.
//! Force-deleting contents is deliberately out of bounds.

use std::fs;
use std::path::Path;

use tracing::debug;

use dirmirror_core::domain::{SyncError, SyncOutcome};

use crate::mapper;

/// Walks the replica tree and removes entries with no source counterpart.
pub struct PruneStage<'a> {
    source_root: &'a Path,
    replica_root: &'a Path,
}

impl<'a> PruneStage<'a> {
    /// Create a prune stage over the given roots.
    #[must_use]
    pub fn new(source_root: &'a Path, replica_root: &'a Path) -> Self {
        Self {
            source_root,
            replica_root,
        }
    }

    /// Run the stage, emitting one [`SyncOutcome`] per removal or failure.
    pub fn run(&self, emit: &mut dyn FnMut(SyncOutcome)) {
        debug!(replica = %self.replica_root.display(), "prune stage starting");
        self.walk(self.replica_root, emit);
    }

    /// Recursively visit `dir`, children before the directory itself.
    fn walk(&self, dir: &Path, emit: &mut dyn FnMut(SyncOutcome)) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                emit(SyncOutcome::Failed(SyncError::EntryRemoveFailure {
                    path: dir.to_path_buf(),
                    source: err,
                }));
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    emit(SyncOutcome::Failed(SyncError::EntryRemoveFailure {
                        path: dir.to_path_buf(),
                        source: err,
                    }));
                    continue;
                }
            };

            let path = entry.path();
            // DirEntry::metadata does not follow symlinks: a replica
            // link counts as a file, so only the link itself is ever
            // removed, never the target's contents.
            let is_dir = match entry.metadata() {
                Ok(meta) => meta.is_dir(),
                Err(err) => {
                    emit(SyncOutcome::Failed(SyncError::EntryRemoveFailure {
                        path,
                        source: err,
                    }));
                    continue;
                }
            };

            if is_dir {
                // Bottom-up: empty out the subtree before judging the
                // directory itself.
                self.walk(&path, emit);
                self.prune_directory(&path, emit);
            } else {
                self.prune_file(&path, emit);
            }
        }
    }

    /// Remove `replica_file` when the source has no file at the mapped
    /// path.
    fn prune_file(&self, replica_file: &Path, emit: &mut dyn FnMut(SyncOutcome)) {
        let source_file = match mapper::map_path(replica_file, self.replica_root, self.source_root)
        {
            Ok(path) => path,
            Err(err) => {
                emit(SyncOutcome::Failed(err));
                return;
            }
        };

        if source_file.is_file() {
            return;
        }

        match fs::remove_file(replica_file) {
            Ok(()) => emit(SyncOutcome::Removed {
                replica: replica_file.to_path_buf(),
            }),
            Err(err) => emit(SyncOutcome::Failed(SyncError::EntryRemoveFailure {
                path: replica_file.to_path_buf(),
                source: err,
            })),
        }
    }

    /// Remove `replica_dir` (expected empty by now) when the source has
    /// no directory at the mapped path.
    fn prune_directory(&self, replica_dir: &Path, emit: &mut dyn FnMut(SyncOutcome)) {
        let source_dir = match mapper::map_path(replica_dir, self.replica_root, self.source_root) {
            Ok(path) => path,
            Err(err) => {
                emit(SyncOutcome::Failed(err));
                return;
            }
        };

        if source_dir.is_dir() {
            return;
        }

        match fs::remove_dir(replica_dir) {
            Ok(()) => emit(SyncOutcome::RemovedDir {
                replica: replica_dir.to_path_buf(),
            }),
            Err(err) => emit(SyncOutcome::Failed(SyncError::EntryRemoveDirFailure {
                path: replica_dir.to_path_buf(),
                source: err,
            })),
        }
    }
}
