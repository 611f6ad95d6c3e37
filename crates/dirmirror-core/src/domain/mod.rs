//! Domain types for one sync pass
//!
//! This module contains the core domain types for dirmirror:
//! - Validated newtypes for tree roots
//! - Per-entry sync outcomes and the per-pass report
//! - Domain-specific error types

pub mod errors;
pub mod newtypes;
pub mod outcome;

// Re-export commonly used types
pub use errors::SyncError;
pub use newtypes::TreeRoot;
pub use outcome::{PassReport, SyncOutcome};
