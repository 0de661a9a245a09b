//! Eval reporter that emits one `tracing` event per verdict.

use async_trait::async_trait;

use crate::domain::evaluation::EvalRecord;
use crate::ports::EvalReporter;

/// Logs passing verdicts at info and failing ones at warn.
#[derive(Debug, Clone, Default)]
pub struct TracingEvalReporter;

impl TracingEvalReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EvalReporter for TracingEvalReporter {
    async fn report(&self, record: EvalRecord) {
        let metadata = serde_json::Value::Object(record.verdict.metadata.clone());

        if record.verdict.passed {
            tracing::info!(
                eval = %record.eval_name,
                thread_id = %record.thread_id,
                session_id = %record.session_id,
                passed = true,
                metadata = %metadata,
                "Eval passed"
            );
        } else {
            tracing::warn!(
                eval = %record.eval_name,
                thread_id = %record.thread_id,
                session_id = %record.session_id,
                passed = false,
                metadata = %metadata,
                "Eval failed"
            );
        }
    }
}
