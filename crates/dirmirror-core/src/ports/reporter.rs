//! Reporter port - the logging collaborator seam

use crate::domain::SyncOutcome;

/// Receives every outcome produced during a sync pass
///
/// Implementations must not fail: a reporter that cannot persist an
/// outcome handles that internally (the audit logger warns via `tracing`
/// and moves on). The engine never aborts because of its reporter.
pub trait SyncReporter: Send + Sync {
    /// Record one outcome
    fn record(&self, outcome: &SyncOutcome);
}

/// Reporter that discards all outcomes
///
/// Useful for callers that only want the returned `PassReport`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl SyncReporter for NullReporter {
    fn record(&self, _outcome: &SyncOutcome) {}
}
