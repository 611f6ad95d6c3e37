//! dirmirror Audit - append-only log of sync outcomes
//!
//! Implements the [`dirmirror_core::ports::SyncReporter`] port with a
//! plain-text log file: one `<timestamp> - <level>: <message>` line per
//! outcome, with the message text mirrored to stdout.

pub mod logger;

pub use logger::{LogLevel, SyncLogger};
