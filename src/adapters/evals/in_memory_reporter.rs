//! In-memory eval reporter for testing.
//!
//! Evals run in a detached task, so tests cannot await them directly.
//! [`InMemoryEvalReporter::wait_for`] blocks until enough verdicts arrive.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

use crate::domain::evaluation::EvalRecord;
use crate::ports::EvalReporter;

/// Captures every reported verdict.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEvalReporter {
    records: Arc<RwLock<Vec<EvalRecord>>>,
    notify: Arc<Notify>,
}

impl InMemoryEvalReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All verdicts reported so far, in arrival order.
    pub async fn records(&self) -> Vec<EvalRecord> {
        self.records.read().await.clone()
    }

    /// The first verdict reported for `eval_name`.
    pub async fn find(&self, eval_name: &str) -> Option<EvalRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.eval_name == eval_name)
            .cloned()
    }

    /// Waits until at least `count` verdicts were reported or `timeout`
    /// elapses, then returns what arrived.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<EvalRecord> {
        let wait = async {
            loop {
                let notified = self.notify.notified();
                if self.records.read().await.len() >= count {
                    return;
                }
                notified.await;
            }
        };
        let _ = tokio::time::timeout(timeout, wait).await;
        self.records().await
    }
}

#[async_trait]
impl EvalReporter for InMemoryEvalReporter {
    async fn report(&self, record: EvalRecord) {
        self.records.write().await.push(record);
        self.notify.notify_waiters();
    }
}
