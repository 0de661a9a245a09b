//! Scorer-backed threshold check.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::evaluation::{EvalVerdict, Score};
use crate::ports::{Scorer, ScorerInput};

use super::{Eval, EvalError, EvalInput, EvalOutput};

/// Adapts the translation shapes into a scorer's `{request, response}` pair.
pub type ScorerInputMapper = Arc<dyn Fn(&EvalInput, &EvalOutput) -> ScorerInput + Send + Sync>;

/// Maps a translation to `request = Translate "{text}" to {language}` and
/// `response = translation`.
pub fn translation_scorer_input(input: &EvalInput, output: &EvalOutput) -> ScorerInput {
    ScorerInput::new(
        format!("Translate \"{}\" to {}", input.text, input.to_language),
        output.translation.clone(),
    )
}

/// Passes when the scorer's rating is at least `threshold`.
pub struct ThresholdEval {
    name: String,
    scorer: Arc<dyn Scorer>,
    threshold: Score,
    mapper: ScorerInputMapper,
}

impl ThresholdEval {
    /// Default passing score for presets.
    pub const DEFAULT_THRESHOLD: f64 = 0.7;

    pub fn new(
        name: impl Into<String>,
        scorer: Arc<dyn Scorer>,
        threshold: Score,
        mapper: ScorerInputMapper,
    ) -> Self {
        Self {
            name: name.into(),
            scorer,
            threshold,
            mapper,
        }
    }

    /// The `politeness` preset over translations.
    pub fn politeness(scorer: Arc<dyn Scorer>, threshold: Score) -> Self {
        Self::new(
            "politeness",
            scorer,
            threshold,
            Arc::new(translation_scorer_input),
        )
    }
}

#[async_trait]
impl Eval for ThresholdEval {
    fn name(&self) -> &str {
        &self.name
    }

    async fn evaluate(
        &self,
        input: &EvalInput,
        output: &EvalOutput,
    ) -> Result<EvalVerdict, EvalError> {
        let scorer_input = (self.mapper)(input, output);
        let scored = self
            .scorer
            .score(&scorer_input, &input.request_metadata(&self.name))
            .await?;

        let verdict = match Score::try_new(scored.score) {
            Ok(score) => EvalVerdict::from_bool(score.meets(self.threshold))
                .with_metadata("score", score.value())
                .with_metadata(
                    "reason",
                    scored
                        .reason
                        .unwrap_or_else(|| format!("score {} against threshold {}", score, self.threshold)),
                ),
            Err(_) => EvalVerdict::fail().with_metadata(
                "reason",
                format!("scorer returned {} which is outside 0.0-1.0", scored.score),
            ),
        };

        Ok(verdict
            .with_metadata("threshold", self.threshold.value())
            .with_metadata("scorer", self.scorer.name()))
    }
}
