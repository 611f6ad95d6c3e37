//! SyncLogger - the log-file collaborator
//!
//! Each call opens the log file in append mode, writes one formatted
//! line, and closes it again; no handle is held across a pass. That is
//! safe under the single-writer, single-process model and means a log
//! rotated or deleted externally just starts a fresh file on the next
//! line. All methods are non-fatal: errors in log persistence are
//! reported via `tracing::warn!` but never propagated, so logging
//! failures cannot break sync operations.

use std::fmt::{self, Display, Formatter};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;

use dirmirror_core::domain::SyncOutcome;
use dirmirror_core::ports::SyncReporter;

/// Severity of a log line; rendered lowercase in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A successful outcome
    Info,
    /// A failed outcome or fatal pre-pass condition
    Error,
}

impl LogLevel {
    /// The lowercase token used in the log line
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only audit log with a stdout mirror
///
/// Line format: `YYYY-MM-DD HH:MM:SS - <level>: <message>` in local
/// time. The stdout mirror prints the message text only, not the
/// formatted line.
pub struct SyncLogger {
    path: PathBuf,
    mirror_stdout: bool,
}

impl SyncLogger {
    /// Create a logger appending to the file at `path`
    ///
    /// The file is created on first write. Mirroring to stdout is on by
    /// default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mirror_stdout: true,
        }
    }

    /// Disable the stdout mirror (used by tests and quiet mode)
    #[must_use]
    pub fn without_stdout_mirror(mut self) -> Self {
        self.mirror_stdout = false;
        self
    }

    /// Append an info-level line
    pub fn info(&self, message: &str) {
        self.append(LogLevel::Info, message);
    }

    /// Append an error-level line
    pub fn error(&self, message: &str) {
        self.append(LogLevel::Error, message);
    }

    fn append(&self, level: LogLevel, message: &str) {
        if let Err(err) = self.try_append(level, message) {
            tracing::warn!(
                log_file = %self.path.display(),
                error = %err,
                "Failed to append to audit log"
            );
        }

        if self.mirror_stdout {
            println!("{message}");
        }
    }

    /// Open-append-close for a single line
    fn try_append(&self, level: LogLevel, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{timestamp} - {level}: {message}")
    }
}

impl SyncReporter for SyncLogger {
    fn record(&self, outcome: &SyncOutcome) {
        let message = outcome.message();
        if outcome.is_failure() {
            self.error(&message);
        } else {
            self.info(&message);
        }
    }
}
