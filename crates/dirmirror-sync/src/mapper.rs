//! Path mapping between the two tree roots
//!
//! The same path relative to either root denotes the same logical entry;
//! mapping strips one root prefix and joins the remainder onto the other
//! root.

use std::path::{Path, PathBuf};

use dirmirror_core::domain::SyncError;

/// Re-root `entry` from `root_a` onto `root_b`.
///
/// Pure function with no filesystem access. Mapping the root itself
/// yields the other root.
///
/// # Errors
/// Returns `SyncError::PathNotUnderRoot` if `entry` is not under
/// `root_a`. A correct tree walk never produces such a path; this is an
/// invariant guard, not a recoverable case.
pub fn map_path(entry: &Path, root_a: &Path, root_b: &Path) -> Result<PathBuf, SyncError> {
    let relative = entry
        .strip_prefix(root_a)
        .map_err(|_| SyncError::PathNotUnderRoot {
            path: entry.to_path_buf(),
            root: root_a.to_path_buf(),
        })?;
    Ok(root_b.join(relative))
}
