//! Staleness check for a single file
//!
//! The sole staleness signal is the modification time, at whatever
//! resolution the filesystem exposes. Equal timestamps mean up to date:
//! a source file rewritten with an identical timestamp is NOT re-copied.
//! This approximation is deliberate and load-bearing; do not replace it
//! with a content comparison.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Whether `replica` is missing or stale relative to `source`.
///
/// Returns true if `replica` does not exist, or if `source`'s
/// last-modified timestamp is strictly greater than `replica`'s.
///
/// # Errors
/// Propagates metadata errors other than the replica being absent; the
/// caller folds them into the entry's copy failure.
pub fn needs_copy(source: &Path, replica: &Path) -> io::Result<bool> {
    let replica_meta = match fs::metadata(replica) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(true),
        Err(err) => return Err(err),
    };

    let source_modified = fs::metadata(source)?.modified()?;
    let replica_modified = replica_meta.modified()?;

    Ok(source_modified > replica_modified)
}
