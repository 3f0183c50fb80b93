//! Profiler data collectors.
//!
//! A collector is driven by the hosting profiler once per request:
//! - `collect` after the response is built
//! - accessors while rendering the panel
//! - `reset` before the collector is reused

pub mod block;
pub mod context;
pub mod snapshot;

pub use block::{BlockCollector, CollectStatus};
pub use context::{RequestContext, ResponseContext};
pub use snapshot::Snapshot;

/// Contract between the profiler and each of its collectors
pub trait DataCollector {
    /// Key the profiler files this collector's data under
    fn name(&self) -> &'static str;

    /// Capture data for a finished request
    fn collect(
        &mut self,
        request: &RequestContext,
        response: &ResponseContext,
        error: Option<&dyn std::error::Error>,
    );

    /// Drop everything captured so far
    fn reset(&mut self);
}
