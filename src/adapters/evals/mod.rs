//! Eval Reporter Adapters.
//!
//! - `TracingEvalReporter` - logs each verdict as a structured event
//! - `InMemoryEvalReporter` - captures verdicts for assertions

mod in_memory_reporter;
mod tracing_reporter;

pub use in_memory_reporter::InMemoryEvalReporter;
pub use tracing_reporter::TracingEvalReporter;
