//! Fixed-answer scorer for tests and offline runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::ports::{RequestMetadata, Scorer, ScorerError, ScorerInput, ScorerOutput};

/// Always returns the same score, or always fails.
#[derive(Debug, Clone)]
pub struct StaticScorer {
    outcome: Result<f64, String>,
    calls: Arc<AtomicUsize>,
}

impl StaticScorer {
    /// A scorer that answers `score` for every input.
    pub fn new(score: f64) -> Self {
        Self {
            outcome: Ok(score),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A scorer whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scorer for StaticScorer {
    fn name(&self) -> &str {
        "static"
    }

    async fn score(
        &self,
        _input: &ScorerInput,
        _metadata: &RequestMetadata,
    ) -> Result<ScorerOutput, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(score) => Ok(ScorerOutput {
                score: *score,
                reason: Some("static score".to_string()),
            }),
            Err(message) => Err(ScorerError::InvalidOutput(message.clone())),
        }
    }
}
