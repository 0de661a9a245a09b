//! Translation engine: one model call per translation.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::translation::{Language, ModelName};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata, ResponseFormat};

use super::TranslateError;

/// What a successful model call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub translation: String,
    /// Provider-reported total tokens, 0 when usage was omitted.
    pub tokens_used: u32,
}

#[derive(Debug, Deserialize)]
struct ModelAnswer {
    translation: String,
}

/// Builds the prompt, calls the provider once, and validates the answer.
#[derive(Clone)]
pub struct TranslationEngine {
    provider: Arc<dyn AIProvider>,
}

impl TranslationEngine {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    fn system_prompt(to_language: Language) -> String {
        format!(
            "You are a translator. Translate the user's message to {}. \
             Respond with JSON: {{ \"translation\": \"the translated text\" }}",
            to_language
        )
    }

    /// Translates `text` into `to_language` using `model`.
    ///
    /// A response that is not a JSON object with a string `translation` field
    /// is an error; nothing is defaulted.
    pub async fn translate(
        &self,
        text: &str,
        to_language: Language,
        model: ModelName,
        metadata: RequestMetadata,
    ) -> Result<TranslationOutcome, TranslateError> {
        let request = CompletionRequest::new(metadata)
            .with_model(model.as_str())
            .with_system_prompt(Self::system_prompt(to_language))
            .with_message(MessageRole::User, text)
            .with_response_format(ResponseFormat::JsonObject);

        let response = self.provider.complete(request).await?;
        let tokens_used = response.total_tokens();

        let answer: ModelAnswer = serde_json::from_str(&response.content)
            .map_err(|e| TranslateError::InvalidModelOutput(e.to_string()))?;

        Ok(TranslationOutcome {
            translation: answer.translation,
            tokens_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::{SessionId, ThreadId};
    use crate::ports::{AIError, TokenUsage};
    use serde_json::json;

    fn metadata() -> RequestMetadata {
        RequestMetadata::new(ThreadId::new("thrd_1").unwrap(), SessionId::new(), "trace")
    }

    #[tokio::test]
    async fn returns_translation_and_tokens() {
        let provider =
            Arc::new(MockAIProvider::new().with_json_response(json!({"translation": "Hola"}), 12));
        let engine = TranslationEngine::new(provider);

        let outcome = engine
            .translate("Hello", Language::Spanish, ModelName::Gpt5Nano, metadata())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            TranslationOutcome {
                translation: "Hola".to_string(),
                tokens_used: 12,
            }
        );
    }

    #[tokio::test]
    async fn request_fixes_language_model_and_json_mode() {
        let provider =
            Arc::new(MockAIProvider::new().with_json_response(json!({"translation": "Bonjour"}), 9));
        let engine = TranslationEngine::new(provider.clone());

        engine
            .translate("Hello", Language::French, ModelName::Gpt5Mini, metadata())
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.model.as_deref(), Some("gpt-5-mini"));
        assert_eq!(call.response_format, ResponseFormat::JsonObject);
        assert!(call.system_prompt.as_deref().unwrap().contains("French"));
        assert_eq!(call.messages[0].role, MessageRole::User);
        assert_eq!(call.messages[0].content, "Hello");
    }

    #[tokio::test]
    async fn missing_usage_counts_as_zero_tokens() {
        let provider = Arc::new(
            MockAIProvider::new().with_response_full(r#"{"translation":"Hallo"}"#, None),
        );
        let engine = TranslationEngine::new(provider);

        let outcome = engine
            .translate("Hello", Language::German, ModelName::Gpt5, metadata())
            .await
            .unwrap();

        assert_eq!(outcome.tokens_used, 0);
    }

    #[tokio::test]
    async fn malformed_json_is_fatal() {
        let provider = Arc::new(
            MockAIProvider::new().with_response_full("Hola", Some(TokenUsage::new(1, 1))),
        );
        let engine = TranslationEngine::new(provider);

        let result = engine
            .translate("Hello", Language::Spanish, ModelName::Gpt5Nano, metadata())
            .await;

        assert!(matches!(result, Err(TranslateError::InvalidModelOutput(_))));
    }

    #[tokio::test]
    async fn missing_translation_field_is_fatal() {
        let provider =
            Arc::new(MockAIProvider::new().with_json_response(json!({"text": "Hola"}), 5));
        let engine = TranslationEngine::new(provider);

        let result = engine
            .translate("Hello", Language::Spanish, ModelName::Gpt5Nano, metadata())
            .await;

        assert!(matches!(result, Err(TranslateError::InvalidModelOutput(_))));
    }

    #[tokio::test]
    async fn non_string_translation_is_fatal() {
        let provider =
            Arc::new(MockAIProvider::new().with_json_response(json!({"translation": 42}), 5));
        let engine = TranslationEngine::new(provider);

        let result = engine
            .translate("Hello", Language::Spanish, ModelName::Gpt5Nano, metadata())
            .await;

        assert!(matches!(result, Err(TranslateError::InvalidModelOutput(_))));
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        }));
        let engine = TranslationEngine::new(provider);

        let result = engine
            .translate("Hello", Language::Spanish, ModelName::Gpt5Nano, metadata())
            .await;

        assert!(matches!(
            result,
            Err(TranslateError::Provider(AIError::Unavailable { .. }))
        ));
    }
}
