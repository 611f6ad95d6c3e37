//! Configuration module for dirmirror.
//!
//! Provides typed configuration structs with sensible defaults. The
//! configuration is assembled from CLI arguments; there is no config
//! file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::TreeRoot;

/// Default seconds between sync passes.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Top-level configuration for dirmirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Root of the tree to mirror from.
    pub source_root: TreeRoot,
    /// Root of the tree to mirror to; created if absent.
    pub replica_root: TreeRoot,
    /// Seconds between sync passes.
    pub interval_secs: u64,
}

/// Audit log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Path to the audit log file; appended to, created if absent.
    pub file: PathBuf,
}

impl Config {
    /// Build a configuration from the three required paths, using the
    /// default interval.
    pub fn new(source_root: TreeRoot, replica_root: TreeRoot, log_file: PathBuf) -> Self {
        Self {
            sync: SyncConfig {
                source_root,
                replica_root,
                interval_secs: DEFAULT_INTERVAL_SECS,
            },
            logging: LoggingConfig { file: log_file },
        }
    }

    /// Override the pass interval in seconds.
    #[must_use]
    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.sync.interval_secs = interval_secs;
        self
    }
}
