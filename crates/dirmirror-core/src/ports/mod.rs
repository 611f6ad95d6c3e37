//! Port definitions
//!
//! The engine depends on one outward-facing interface: the reporter that
//! receives a [`crate::domain::SyncOutcome`] for every entry handled
//! during a pass. The production implementation lives in the audit crate;
//! tests substitute an in-memory recorder.

pub mod reporter;

pub use reporter::{NullReporter, SyncReporter};
