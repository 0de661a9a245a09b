//! Post-hoc evals of completed translations.
//!
//! Every check implements [`Eval`]. The [`EvalHarness`] runs all configured
//! checks concurrently in a detached task after a response has been produced
//! and hands each verdict to an [`EvalReporter`](crate::ports::EvalReporter).
//!
//! ## Checks
//!
//! - [`ThresholdEval`] - scorer-backed, passes when the score reaches a
//!   threshold; [`ThresholdEval::politeness`] is the politeness preset
//! - [`CorrectLanguageEval`] - asks a model whether the translation is in
//!   the requested language

mod correct_language;
mod harness;
mod threshold;

pub use correct_language::CorrectLanguageEval;
pub use harness::EvalHarness;
pub use threshold::{translation_scorer_input, ScorerInputMapper, ThresholdEval};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::evaluation::EvalVerdict;
use crate::domain::foundation::{SessionId, ThreadId};
use crate::domain::translation::{Language, ModelName};
use crate::ports::{AIError, RequestMetadata, ScorerError};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalInput {
    pub thread_id: ThreadId,
    pub session_id: SessionId,
    pub text: String,
    pub to_language: Language,
    pub model: ModelName,
}

impl EvalInput {
    /// Metadata for model calls an eval makes on behalf of this request.
    pub fn request_metadata(&self, eval_name: &str) -> RequestMetadata {
        RequestMetadata::new(
            self.thread_id.clone(),
            self.session_id,
            format!("eval:{}:{}", eval_name, self.session_id),
        )
    }
}

/// What the handler answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOutput {
    pub translation: String,
    pub word_count: u32,
    pub tokens: u32,
}

/// Errors an eval may raise. The harness turns them into failed verdicts.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("scorer failed: {0}")]
    Scorer(#[from] ScorerError),

    #[error("model call failed: {0}")]
    Provider(#[from] AIError),
}

/// A named check over one request/response pair.
#[async_trait]
pub trait Eval: Send + Sync {
    /// Name reported alongside every verdict.
    fn name(&self) -> &str;

    async fn evaluate(
        &self,
        input: &EvalInput,
        output: &EvalOutput,
    ) -> Result<EvalVerdict, EvalError>;
}
