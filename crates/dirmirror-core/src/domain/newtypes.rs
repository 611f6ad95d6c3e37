//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the two tree roots. Validation happens at
//! construction time; downstream code can assume a root is a usable path.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::SyncError;

/// The top of a source or replica tree
///
/// A `TreeRoot` may be absolute or relative; it is only required to be
/// non-empty. Whether the path exists is checked per pass, not at
/// construction: the source root may disappear and reappear between
/// passes, and the replica root is created on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathBuf", into = "PathBuf")]
pub struct TreeRoot(PathBuf);

impl TreeRoot {
    /// Create a new `TreeRoot`
    ///
    /// # Errors
    /// Returns `SyncError::InvalidRoot` if the path is empty
    pub fn new(path: PathBuf) -> Result<Self, SyncError> {
        if path.as_os_str().is_empty() {
            return Err(SyncError::InvalidRoot(
                "Root path cannot be empty".to_string(),
            ));
        }
        Ok(Self(path))
    }

    /// Get the inner path reference
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to an owned `PathBuf`
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join a path relative to this root
    #[must_use]
    pub fn join(&self, relative: &Path) -> PathBuf {
        self.0.join(relative)
    }

    /// Whether the root currently exists on the filesystem
    #[must_use]
    pub fn exists(&self) -> bool {
        self.0.exists()
    }
}

impl Display for TreeRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl TryFrom<PathBuf> for TreeRoot {
    type Error = SyncError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<TreeRoot> for PathBuf {
    fn from(root: TreeRoot) -> Self {
        root.0
    }
}

impl AsRef<Path> for TreeRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
