//! Runs every configured eval against a completed request.

use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::evaluation::{EvalRecord, EvalVerdict};
use crate::ports::EvalReporter;

use super::{Eval, EvalInput, EvalOutput};

/// Fans a request/response pair out to all evals and reports the verdicts.
///
/// Evals are independent: they run concurrently, and an eval that errors
/// yields a failed verdict for itself only.
pub struct EvalHarness {
    evals: Vec<Arc<dyn Eval>>,
    reporter: Arc<dyn EvalReporter>,
}

impl EvalHarness {
    pub fn new(reporter: Arc<dyn EvalReporter>) -> Self {
        Self {
            evals: Vec::new(),
            reporter,
        }
    }

    pub fn with_eval(mut self, eval: Arc<dyn Eval>) -> Self {
        self.evals.push(eval);
        self
    }

    /// Names of the configured evals, in registration order.
    pub fn eval_names(&self) -> Vec<String> {
        self.evals.iter().map(|e| e.name().to_string()).collect()
    }

    /// Runs all evals and returns the records.
    ///
    /// Each verdict is reported as soon as its eval finishes, so a slow eval
    /// never holds back the others.
    pub async fn run(&self, input: &EvalInput, output: &EvalOutput) -> Vec<EvalRecord> {
        join_all(self.evals.iter().map(|eval| async move {
            let verdict = match eval.evaluate(input, output).await {
                Ok(verdict) => verdict,
                Err(err) => {
                    tracing::warn!(
                        eval = %eval.name(),
                        thread_id = %input.thread_id,
                        error = %err,
                        "Eval errored"
                    );
                    EvalVerdict::fail().with_metadata("reason", format!("eval error: {}", err))
                }
            };
            let record =
                EvalRecord::new(eval.name(), input.thread_id.clone(), input.session_id, verdict);
            self.reporter.report(record.clone()).await;
            record
        }))
        .await
    }

    /// Runs [`run`](Self::run) in a detached task.
    pub fn spawn(self: &Arc<Self>, input: EvalInput, output: EvalOutput) -> JoinHandle<()> {
        let harness = Arc::clone(self);
        tokio::spawn(async move {
            harness.run(&input, &output).await;
        })
    }
}
