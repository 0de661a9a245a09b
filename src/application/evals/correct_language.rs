//! Judge-model check that a translation is in the requested language.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::evaluation::EvalVerdict;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, ResponseFormat};

use super::{Eval, EvalError, EvalInput, EvalOutput};

const NO_RESPONSE: &str = "No response";

#[derive(Debug, Default, Deserialize)]
struct JudgeAnswer {
    #[serde(default)]
    correct: Option<bool>,
    #[serde(default)]
    reason: Option<String>,
}

/// Binary check: passes only if the judge answers `"correct": true`.
///
/// The judge's answer is read permissively. Anything that does not parse, or
/// lacks a boolean `correct`, is a failed verdict rather than an error.
pub struct CorrectLanguageEval {
    provider: Arc<dyn AIProvider>,
    model: String,
}

impl CorrectLanguageEval {
    pub const NAME: &'static str = "correct-language";

    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn verdict_from(content: &str) -> EvalVerdict {
        let answer: JudgeAnswer = serde_json::from_str(content).unwrap_or_default();
        EvalVerdict::from_bool(answer.correct.unwrap_or(false)).with_metadata(
            "reason",
            answer.reason.unwrap_or_else(|| NO_RESPONSE.to_string()),
        )
    }
}

#[async_trait]
impl Eval for CorrectLanguageEval {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn evaluate(
        &self,
        input: &EvalInput,
        output: &EvalOutput,
    ) -> Result<EvalVerdict, EvalError> {
        let request = CompletionRequest::new(input.request_metadata(Self::NAME))
            .with_model(&self.model)
            .with_system_prompt(format!(
                "Is this text written in {}? Respond with JSON: {{ \"correct\": true/false, \"reason\": \"brief explanation\" }}",
                input.to_language
            ))
            .with_message(MessageRole::User, &output.translation)
            .with_response_format(ResponseFormat::JsonObject);

        let response = self.provider.complete(request).await?;

        Ok(Self::verdict_from(&response.content))
    }
}
