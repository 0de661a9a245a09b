//! Eval Reporter Port - sink for eval verdicts.

use async_trait::async_trait;

use crate::domain::evaluation::EvalRecord;

/// Receives every verdict the eval harness produces.
///
/// Reporting happens off the request path, so implementations handle their
/// own failures instead of returning them.
#[async_trait]
pub trait EvalReporter: Send + Sync {
    async fn report(&self, record: EvalRecord);
}
