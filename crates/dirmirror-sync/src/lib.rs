//! dirmirror Sync - One-way mirroring engine
//!
//! Walks a source tree and a replica tree once per pass and makes the
//! replica an exact mirror of the source: copy then prune, nothing kept
//! between passes.
//!
//! ## Modules
//!
//! - [`mapper`] - Re-roots an entry path from one tree onto the other
//! - [`compare`] - Staleness check (missing replica or newer source mtime)
//! - [`copy`] - Copy stage: walk the source, create/update replica entries
//! - [`prune`] - Prune stage: walk the replica bottom-up, remove orphans
//! - [`engine`] - Orchestrates one copy-then-prune pass
//! - [`scheduler`] - Fixed-interval pass loop with graceful shutdown

pub mod compare;
pub mod copy;
pub mod engine;
pub mod mapper;
pub mod prune;
pub mod scheduler;

pub use engine::SyncEngine;
pub use scheduler::Scheduler;
