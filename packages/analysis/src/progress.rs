//! Progress reporting for analysis runs.
//!
//! The driver reports one unit of work per storm through a
//! [`ProgressCallback`]. Rendering (terminal bars, log lines, nothing) is
//! left to the caller.

use std::sync::Arc;

/// Receives progress from a running analysis.
///
/// Implementations must be `Send + Sync`; the parallel driver calls them
/// from worker threads.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of storms to process.
    fn set_total(&self, total: u64);

    /// Advance by `delta` storms.
    fn inc(&self, delta: u64);

    /// Update the message shown alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
