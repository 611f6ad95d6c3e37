//! Copy stage - walk the source tree, create/update replica entries
//!
//! Directories are ensured before their contents are visited, so a
//! totally fresh replica fills in top-down. A failure on one entry is
//! emitted and the walk continues; one bad file never aborts a pass.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use dirmirror_core::domain::{SyncError, SyncOutcome};

use crate::{compare, mapper};

/// Walks the source tree and brings the replica up to date with it.
///
/// Borrowed roots only; the stage holds no state between runs. The
/// replica root itself must already exist (the engine ensures it before
/// any pass).
pub struct CopyStage<'a> {
    source_root: &'a Path,
    replica_root: &'a Path,
}

impl<'a> CopyStage<'a> {
    /// Create a copy stage over the given roots.
    #[must_use]
    pub fn new(source_root: &'a Path, replica_root: &'a Path) -> Self {
        Self {
            source_root,
            replica_root,
        }
    }

    /// Run the stage, emitting one [`SyncOutcome`] per entry visited.
    pub fn run(&self, emit: &mut dyn FnMut(SyncOutcome)) {
        debug!(source = %self.source_root.display(), "copy stage starting");
        self.walk(self.source_root, emit);
    }

    /// Recursively visit `dir`, syncing files and ensuring directories.
    fn walk(&self, dir: &Path, emit: &mut dyn FnMut(SyncOutcome)) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                emit(SyncOutcome::Failed(SyncError::EntryCopyFailure {
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
                    emit(SyncOutcome::Failed(SyncError::EntryCopyFailure {
                        path: dir.to_path_buf(),
                        source: err,
                    }));
                    continue;
                }
            };

            let path = entry.path();
            // fs::metadata follows symlinks, so a link to a directory
            // is walked (the replica gets a real directory) and a link
            // to a file is copied by content.
            let is_dir = match fs::metadata(&path) {
                Ok(meta) => meta.is_dir(),
                Err(err) => {
                    emit(SyncOutcome::Failed(SyncError::EntryCopyFailure {
                        path,
                        source: err,
                    }));
                    continue;
                }
            };

            if is_dir {
                self.sync_directory(&path, emit);
                self.walk(&path, emit);
            } else {
                self.sync_file(&path, emit);
            }
        }
    }

    /// Ensure the replica directory for `source_dir` exists.
    fn sync_directory(&self, source_dir: &Path, emit: &mut dyn FnMut(SyncOutcome)) {
        let replica_dir = match mapper::map_path(source_dir, self.source_root, self.replica_root) {
            Ok(path) => path,
            Err(err) => {
                emit(SyncOutcome::Failed(err));
                return;
            }
        };

        if replica_dir.is_dir() {
            return;
        }

        // create_dir_all also covers a fresh replica whose parents are
        // missing; a path collision with a non-directory surfaces as an
        // error here and the walk continues.
        match fs::create_dir_all(&replica_dir) {
            Ok(()) => emit(SyncOutcome::CreatedDir {
                replica: replica_dir,
            }),
            Err(err) => emit(SyncOutcome::Failed(SyncError::EntryCreateDirFailure {
                path: replica_dir,
                source: err,
            })),
        }
    }

    /// Copy `source_file` to the replica when stale, preserving its
    /// modification time so the next pass's comparison is stable.
    fn sync_file(&self, source_file: &Path, emit: &mut dyn FnMut(SyncOutcome)) {
        let replica_file = match mapper::map_path(source_file, self.source_root, self.replica_root)
        {
            Ok(path) => path,
            Err(err) => {
                emit(SyncOutcome::Failed(err));
                return;
            }
        };

        match compare::needs_copy(source_file, &replica_file) {
            Ok(false) => emit(SyncOutcome::SkippedUpToDate {
                source: source_file.to_path_buf(),
            }),
            Ok(true) => match copy_preserving_mtime(source_file, &replica_file) {
                Ok(()) => emit(SyncOutcome::Copied {
                    source: source_file.to_path_buf(),
                    replica: replica_file,
                }),
                Err(err) => emit(SyncOutcome::Failed(SyncError::EntryCopyFailure {
                    path: source_file.to_path_buf(),
                    source: err,
                })),
            },
            Err(err) => emit(SyncOutcome::Failed(SyncError::EntryCopyFailure {
                path: source_file.to_path_buf(),
                source: err,
            })),
        }
    }
}

/// Copy file content and carry the source modification time onto the
/// replica.
///
/// `fs::copy` preserves permissions but not timestamps; without the
/// explicit `set_modified` every subsequent pass would see the replica as
/// stale and re-copy it.
fn copy_preserving_mtime(source: &Path, replica: &Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    fs::copy(source, replica)?;

    let replica_file = fs::OpenOptions::new().write(true).open(replica)?;
    replica_file.set_modified(modified)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::{Duration, SystemTime};

    use tempfile::tempdir;

    fn collect(stage: &CopyStage<'_>) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::new();
        stage.run(&mut |outcome| outcomes.push(outcome));
        outcomes
    }

    #[test]
    fn test_fresh_replica_gets_dirs_then_files() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();

        fs::create_dir(source.path().join("dir1")).unwrap();
        fs::write(source.path().join("dir1/file1.txt"), b"hello").unwrap();

        let stage = CopyStage::new(source.path(), replica.path());
        let outcomes = collect(&stage);

        assert!(matches!(outcomes[0], SyncOutcome::CreatedDir { .. }));
        assert!(matches!(outcomes[1], SyncOutcome::Copied { .. }));
        assert_eq!(
            fs::read(replica.path().join("dir1/file1.txt")).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_copy_preserves_mtime() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();

        let source_file = source.path().join("a.txt");
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let mut file = File::create(&source_file).unwrap();
        file.write_all(b"content").unwrap();
        file.set_modified(mtime).unwrap();
        drop(file);

        let stage = CopyStage::new(source.path(), replica.path());
        collect(&stage);

        let replica_mtime = fs::metadata(replica.path().join("a.txt"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(replica_mtime, mtime);
    }

    #[test]
    fn test_up_to_date_file_is_skipped() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();

        fs::write(source.path().join("a.txt"), b"same").unwrap();

        let stage = CopyStage::new(source.path(), replica.path());
        collect(&stage);
        let second = collect(&stage);

        assert_eq!(second.len(), 1);
        assert!(matches!(second[0], SyncOutcome::SkippedUpToDate { .. }));
    }

    #[test]
    fn test_stale_file_is_overwritten() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();

        let source_file = source.path().join("a.txt");
        fs::write(&source_file, b"v1").unwrap();

        let stage = CopyStage::new(source.path(), replica.path());
        collect(&stage);

        // Rewrite with a strictly newer timestamp.
        let newer = fs::metadata(&source_file).unwrap().modified().unwrap()
            + Duration::from_secs(10);
        let mut file = File::create(&source_file).unwrap();
        file.write_all(b"v2").unwrap();
        file.set_modified(newer).unwrap();
        drop(file);

        let outcomes = collect(&stage);
        assert!(matches!(outcomes[0], SyncOutcome::Copied { .. }));
        assert_eq!(fs::read(replica.path().join("a.txt")).unwrap(), b"v2");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_dir_is_walked_as_a_directory() {
        use std::os::unix::fs::symlink;

        let external = tempdir().unwrap();
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();

        fs::write(external.path().join("inner.txt"), b"via link").unwrap();
        symlink(external.path(), source.path().join("linkdir")).unwrap();

        let stage = CopyStage::new(source.path(), replica.path());
        let outcomes = collect(&stage);

        assert!(!outcomes.iter().any(SyncOutcome::is_failure));
        // The replica gets a real directory, not a link.
        let replica_dir = replica.path().join("linkdir");
        assert!(replica_dir.is_dir());
        assert!(!fs::symlink_metadata(&replica_dir).unwrap().is_symlink());
        assert_eq!(
            fs::read(replica_dir.join("inner.txt")).unwrap(),
            b"via link"
        );

        // The next pass sees it all as up to date.
        let second = collect(&stage);
        assert!(second
            .iter()
            .all(|o| matches!(o, SyncOutcome::SkippedUpToDate { .. })));
    }

    #[test]
    fn test_dir_collision_with_file_is_reported_and_walk_continues() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();

        fs::create_dir(source.path().join("both")).unwrap();
        fs::write(source.path().join("zzz.txt"), b"after").unwrap();
        // Replica has a file where the source has a directory.
        fs::write(replica.path().join("both"), b"collision").unwrap();

        let stage = CopyStage::new(source.path(), replica.path());
        let outcomes = collect(&stage);

        assert!(outcomes.iter().any(SyncOutcome::is_failure));
        // The sibling file after the collision still synced.
        assert_eq!(fs::read(replica.path().join("zzz.txt")).unwrap(), b"after");
    }
}
