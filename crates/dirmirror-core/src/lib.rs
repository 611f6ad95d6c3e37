//! dirmirror Core - Domain types and business rules
//!
//! This crate contains the domain core shared by the engine, the audit
//! logger, and the CLI:
//! - **Domain types** - `TreeRoot`, `SyncOutcome`, `PassReport`, `SyncError`
//! - **Port definitions** - The `SyncReporter` trait implemented by the
//!   audit logging adapter
//! - **Configuration** - Typed settings assembled from CLI arguments
//!
//! # Architecture
//!
//! The domain module contains pure types with no filesystem access. The
//! engine crate walks the trees and produces [`domain::SyncOutcome`]
//! values; the reporter port carries them to the logging adapter.

pub mod config;
pub mod domain;
pub mod ports;
