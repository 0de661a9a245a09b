//! Scorer Port - generic request/response quality scoring.
//!
//! Scorers know nothing about translations. They rate a `{request, response}`
//! pair on a 0.0-1.0 scale; callers adapt their own shapes into
//! [`ScorerInput`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AIError, RequestMetadata};

/// The pair being rated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerInput {
    pub request: String,
    pub response: String,
}

impl ScorerInput {
    pub fn new(request: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            response: response.into(),
        }
    }
}

/// Raw scorer output.
///
/// `score` is not range-checked here; a scorer backed by a model may answer
/// outside 0.0-1.0 and the caller decides what that means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerOutput {
    pub score: f64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Errors from scoring.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("scorer provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("scorer returned unusable output: {0}")]
    InvalidOutput(String),
}

/// Port for scoring a request/response pair.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Short identifier used in logs and eval metadata.
    fn name(&self) -> &str;

    /// Rates `input`. `metadata` identifies the request being scored for
    /// scorers that make their own model calls.
    async fn score(
        &self,
        input: &ScorerInput,
        metadata: &RequestMetadata,
    ) -> Result<ScorerOutput, ScorerError>;
}
