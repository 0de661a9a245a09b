//! Politeness scorer backed by a language model acting as judge.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, RequestMetadata, ResponseFormat, Scorer,
    ScorerError, ScorerInput, ScorerOutput,
};

const SYSTEM_PROMPT: &str = "You rate how polite an assistant's response is to the user's \
request. Score from 0.0 (rude or dismissive) to 1.0 (courteous and respectful). \
Respond with JSON: { \"score\": number, \"reason\": \"brief explanation\" }";

/// Asks a judge model to rate the politeness of a response.
pub struct LlmPolitenessScorer {
    provider: Arc<dyn AIProvider>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct JudgeAnswer {
    score: f64,
    #[serde(default)]
    reason: Option<String>,
}

impl LlmPolitenessScorer {
    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn user_message(input: &ScorerInput) -> String {
        format!("Request:\n{}\n\nResponse:\n{}", input.request, input.response)
    }
}

#[async_trait]
impl Scorer for LlmPolitenessScorer {
    fn name(&self) -> &str {
        "llm-politeness"
    }

    async fn score(
        &self,
        input: &ScorerInput,
        metadata: &RequestMetadata,
    ) -> Result<ScorerOutput, ScorerError> {
        let request = CompletionRequest::new(metadata.clone())
            .with_model(&self.model)
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, Self::user_message(input))
            .with_response_format(ResponseFormat::JsonObject);

        let response = self.provider.complete(request).await?;

        let answer: JudgeAnswer = serde_json::from_str(&response.content)
            .map_err(|e| ScorerError::InvalidOutput(format!("judge answer: {}", e)))?;

        Ok(ScorerOutput {
            score: answer.score,
            reason: answer.reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::{SessionId, ThreadId};
    use serde_json::json;

    fn metadata() -> RequestMetadata {
        RequestMetadata::new(ThreadId::new("thrd_1").unwrap(), SessionId::new(), "trace")
    }

    fn input() -> ScorerInput {
        ScorerInput::new("Translate \"Hello\" to Spanish", "Hola")
    }

    #[tokio::test]
    async fn parses_judge_score_and_reason() {
        let provider = Arc::new(
            MockAIProvider::new().with_json_response(json!({"score": 0.9, "reason": "courteous"}), 20),
        );
        let scorer = LlmPolitenessScorer::new(provider.clone(), "gpt-5-nano");

        let output = scorer.score(&input(), &metadata()).await.unwrap();

        assert_eq!(output.score, 0.9);
        assert_eq!(output.reason.as_deref(), Some("courteous"));
    }

    #[tokio::test]
    async fn sends_judge_model_in_json_mode() {
        let provider = Arc::new(MockAIProvider::new().with_json_response(json!({"score": 1.0}), 5));
        let scorer = LlmPolitenessScorer::new(provider.clone(), "gpt-5-mini");

        scorer.score(&input(), &metadata()).await.unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model.as_deref(), Some("gpt-5-mini"));
        assert_eq!(calls[0].response_format, ResponseFormat::JsonObject);
        assert!(calls[0].messages[0].content.contains("Hola"));
    }

    #[tokio::test]
    async fn malformed_answer_is_invalid_output() {
        let provider = Arc::new(MockAIProvider::new().with_response("very polite"));
        let scorer = LlmPolitenessScorer::new(provider, "gpt-5-nano");

        let result = scorer.score(&input(), &metadata()).await;

        assert!(matches!(result, Err(ScorerError::InvalidOutput(_))));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let scorer = LlmPolitenessScorer::new(provider, "gpt-5-nano");

        let result = scorer.score(&input(), &metadata()).await;

        assert!(matches!(result, Err(ScorerError::Provider(_))));
    }
}
