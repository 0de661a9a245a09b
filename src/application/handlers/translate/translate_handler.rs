//! Translate command handler.
//!
//! Dispatches between the three request shapes:
//!
//! | command     | text          | effect                                   |
//! |-------------|---------------|------------------------------------------|
//! | `clear`     | ignored       | history emptied, counter reset           |
//! | `translate` | non-blank     | model call, history append, evals queued |
//! | `translate` | absent/blank  | read-only peek at the current history    |

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::evals::{EvalHarness, EvalInput, EvalOutput};
use crate::domain::foundation::{SessionId, ThreadId};
use crate::domain::translation::{text::word_count, HistoryEntry, Language, ModelName, TranslationHistory};
use crate::ports::RequestMetadata;

use super::{HistoryManager, TranslateError, TranslationEngine};

/// What the caller wants done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    #[default]
    Translate,
    Clear,
}

/// Command to translate text, peek at history, or clear it.
#[derive(Debug, Clone)]
pub struct TranslateCommand {
    pub thread_id: ThreadId,
    pub session_id: SessionId,
    pub text: Option<String>,
    pub to_language: Language,
    pub model: ModelName,
    pub command: Command,
}

impl TranslateCommand {
    /// A translate command for `text`. Fresh session, default model.
    pub fn translate(thread_id: ThreadId, text: impl Into<String>, to_language: Language) -> Self {
        Self {
            thread_id,
            session_id: SessionId::new(),
            text: Some(text.into()),
            to_language,
            model: ModelName::default(),
            command: Command::Translate,
        }
    }

    /// A read-only request for the thread's current state.
    pub fn peek(thread_id: ThreadId) -> Self {
        Self {
            thread_id,
            session_id: SessionId::new(),
            text: None,
            to_language: Language::default(),
            model: ModelName::default(),
            command: Command::Translate,
        }
    }

    /// A request to reset the thread.
    pub fn clear(thread_id: ThreadId) -> Self {
        Self {
            command: Command::Clear,
            ..Self::peek(thread_id)
        }
    }

    pub fn with_model(mut self, model: ModelName) -> Self {
        self.model = model;
        self
    }

    /// The text to translate, if there is any non-blank text.
    fn text_to_translate(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Result of handling a [`TranslateCommand`].
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateResult {
    pub translation: String,
    pub word_count: u32,
    pub tokens: u32,
    pub history: TranslationHistory,
    pub thread_id: ThreadId,
    pub session_id: SessionId,
    /// Translations since the last clear, including ones trimmed from history.
    pub total_translations: u64,
}

impl TranslateResult {
    /// Number of entries in the returned history.
    pub fn translation_count(&self) -> usize {
        self.history.len()
    }

    fn without_translation(
        command: &TranslateCommand,
        history: TranslationHistory,
        total_translations: u64,
    ) -> Self {
        Self {
            translation: String::new(),
            word_count: 0,
            tokens: 0,
            history,
            thread_id: command.thread_id.clone(),
            session_id: command.session_id,
            total_translations,
        }
    }
}

/// Handler for translate/clear commands.
#[derive(Clone)]
pub struct TranslateHandler {
    engine: TranslationEngine,
    history: HistoryManager,
    evals: Option<Arc<EvalHarness>>,
}

impl TranslateHandler {
    pub fn new(engine: TranslationEngine, history: HistoryManager) -> Self {
        Self {
            engine,
            history,
            evals: None,
        }
    }

    /// Runs `evals` after every successful translation.
    pub fn with_evals(mut self, evals: Arc<EvalHarness>) -> Self {
        self.evals = Some(evals);
        self
    }

    pub async fn handle(&self, cmd: TranslateCommand) -> Result<TranslateResult, TranslateError> {
        match cmd.command {
            Command::Clear => self.clear(&cmd).await,
            Command::Translate => match cmd.text_to_translate() {
                Some(text) => self.translate(&cmd, text).await,
                None => self.peek(&cmd).await,
            },
        }
    }

    async fn clear(&self, cmd: &TranslateCommand) -> Result<TranslateResult, TranslateError> {
        self.history.clear(&cmd.thread_id).await?;

        tracing::info!(thread_id = %cmd.thread_id, "Translation history cleared");

        Ok(TranslateResult::without_translation(
            cmd,
            TranslationHistory::new(),
            0,
        ))
    }

    async fn peek(&self, cmd: &TranslateCommand) -> Result<TranslateResult, TranslateError> {
        let history = self.history.read(&cmd.thread_id).await?;
        let total = self.history.count(&cmd.thread_id).await?;

        Ok(TranslateResult::without_translation(cmd, history, total))
    }

    async fn translate(
        &self,
        cmd: &TranslateCommand,
        text: &str,
    ) -> Result<TranslateResult, TranslateError> {
        tracing::info!(
            thread_id = %cmd.thread_id,
            session_id = %cmd.session_id,
            to_language = %cmd.to_language,
            model = %cmd.model,
            text_length = text.chars().count(),
            "Translation requested"
        );

        let metadata = RequestMetadata::new(
            cmd.thread_id.clone(),
            cmd.session_id,
            cmd.session_id.to_string(),
        );
        let outcome = self
            .engine
            .translate(text, cmd.to_language, cmd.model, metadata)
            .await?;

        let entry = HistoryEntry::record(
            text,
            cmd.to_language,
            &outcome.translation,
            cmd.model,
            outcome.tokens_used,
            cmd.session_id,
        );
        let word_count = word_count(&outcome.translation);

        // The append is the commit point; nothing after it may fail the request.
        let history = self.history.append(&cmd.thread_id, entry).await?;
        let total = match self.history.increment_count(&cmd.thread_id).await {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(
                    thread_id = %cmd.thread_id,
                    error = %e,
                    "Translation recorded but counter not updated"
                );
                history.len() as u64
            }
        };

        tracing::info!(
            thread_id = %cmd.thread_id,
            session_id = %cmd.session_id,
            tokens = outcome.tokens_used,
            word_count,
            "Translation completed"
        );

        if let Some(evals) = &self.evals {
            evals.spawn(
                EvalInput {
                    thread_id: cmd.thread_id.clone(),
                    session_id: cmd.session_id,
                    text: text.to_string(),
                    to_language: cmd.to_language,
                    model: cmd.model,
                },
                EvalOutput {
                    translation: outcome.translation.clone(),
                    word_count,
                    tokens: outcome.tokens_used,
                },
            );
        }

        Ok(TranslateResult {
            translation: outcome.translation,
            word_count,
            tokens: outcome.tokens_used,
            history,
            thread_id: cmd.thread_id.clone(),
            session_id: cmd.session_id,
            total_translations: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::evals::InMemoryEvalReporter;
    use crate::adapters::scoring::StaticScorer;
    use crate::adapters::state::InMemoryThreadStateStore;
    use crate::application::evals::{CorrectLanguageEval, ThresholdEval};
    use crate::domain::evaluation::Score;
    use crate::ports::{StateStoreError, ThreadStateStore};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::time::Duration;

    struct Fixture {
        handler: TranslateHandler,
        provider: MockAIProvider,
    }

    fn fixture(provider: MockAIProvider) -> Fixture {
        let store = Arc::new(InMemoryThreadStateStore::new());
        let handler = TranslateHandler::new(
            TranslationEngine::new(Arc::new(provider.clone())),
            HistoryManager::new(store),
        );
        Fixture { handler, provider }
    }

    /// Store whose counter is unreachable.
    #[derive(Clone)]
    struct CounterDownStore(InMemoryThreadStateStore);

    #[async_trait]
    impl ThreadStateStore for CounterDownStore {
        async fn get(&self, t: &ThreadId, k: &str) -> Result<Option<Value>, StateStoreError> {
            self.0.get(t, k).await
        }
        async fn set(&self, t: &ThreadId, k: &str, v: Value) -> Result<(), StateStoreError> {
            self.0.set(t, k, v).await
        }
        async fn compare_and_swap(
            &self,
            t: &ThreadId,
            k: &str,
            expected: Option<&Value>,
            new: Value,
        ) -> Result<bool, StateStoreError> {
            self.0.compare_and_swap(t, k, expected, new).await
        }
        async fn increment(&self, _t: &ThreadId, _k: &str) -> Result<i64, StateStoreError> {
            Err(StateStoreError::Unavailable("connection refused".to_string()))
        }
        async fn delete(&self, t: &ThreadId, k: &str) -> Result<(), StateStoreError> {
            self.0.delete(t, k).await
        }
    }

    fn thread() -> ThreadId {
        ThreadId::new("thrd_handler").unwrap()
    }

    fn hola() -> MockAIProvider {
        MockAIProvider::new().with_json_response(json!({"translation": "Hola"}), 12)
    }

    #[tokio::test]
    async fn first_translation_scenario() {
        let f = fixture(hola());

        let result = f
            .handler
            .handle(TranslateCommand::translate(thread(), "Hello", Language::Spanish))
            .await
            .unwrap();

        assert_eq!(result.translation, "Hola");
        assert_eq!(result.word_count, 1);
        assert_eq!(result.tokens, 12);
        assert_eq!(result.translation_count(), 1);
        assert_eq!(result.total_translations, 1);
        assert_eq!(result.history.entries()[0].translation, "Hola");
        assert_eq!(result.history.entries()[0].text, "Hello");
        assert_eq!(result.history.entries()[0].tokens, 12);
    }

    #[tokio::test]
    async fn peek_without_text_does_not_call_provider() {
        let f = fixture(hola());
        f.handler
            .handle(TranslateCommand::translate(thread(), "Hello", Language::Spanish))
            .await
            .unwrap();

        let result = f.handler.handle(TranslateCommand::peek(thread())).await.unwrap();

        assert_eq!(f.provider.call_count(), 1);
        assert_eq!(result.translation, "");
        assert_eq!(result.tokens, 0);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.translation_count(), 1);
        assert_eq!(result.total_translations, 1);
    }

    #[tokio::test]
    async fn blank_text_is_a_peek() {
        let f = fixture(hola());

        let mut cmd = TranslateCommand::peek(thread());
        cmd.text = Some("   \n".to_string());
        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(f.provider.call_count(), 0);
        assert!(result.history.is_empty());
    }

    #[tokio::test]
    async fn clear_resets_history_and_counts() {
        let provider = MockAIProvider::new()
            .with_json_response(json!({"translation": "Hola"}), 12)
            .with_json_response(json!({"translation": "Adiós"}), 10);
        let f = fixture(provider);
        for text in ["Hello", "Goodbye"] {
            f.handler
                .handle(TranslateCommand::translate(thread(), text, Language::Spanish))
                .await
                .unwrap();
        }

        let cleared = f.handler.handle(TranslateCommand::clear(thread())).await.unwrap();
        let after = f.handler.handle(TranslateCommand::peek(thread())).await.unwrap();

        assert_eq!(cleared.translation, "");
        assert_eq!(cleared.translation_count(), 0);
        assert_eq!(cleared.total_translations, 0);
        assert_eq!(after.translation_count(), 0);
        assert_eq!(after.total_translations, 0);
    }

    #[tokio::test]
    async fn clear_ignores_text() {
        let f = fixture(hola());

        let mut cmd = TranslateCommand::clear(thread());
        cmd.text = Some("Hello".to_string());
        f.handler.handle(cmd).await.unwrap();

        assert_eq!(f.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn history_is_bounded_but_total_keeps_counting() {
        let mut provider = MockAIProvider::new();
        for n in 0..12 {
            provider = provider.with_json_response(json!({"translation": format!("t{}", n)}), 1);
        }
        let f = fixture(provider);

        let mut last = None;
        for n in 0..12 {
            last = Some(
                f.handler
                    .handle(TranslateCommand::translate(thread(), format!("s{}", n), Language::French))
                    .await
                    .unwrap(),
            );
        }

        let last = last.unwrap();
        assert_eq!(last.translation_count(), 10);
        assert_eq!(last.total_translations, 12);
        assert_eq!(last.history.entries()[0].translation, "t11");
        assert_eq!(last.history.entries()[9].translation, "t2");
    }

    #[tokio::test]
    async fn provider_failure_leaves_state_untouched() {
        let f = fixture(MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 60 }));

        let result = f
            .handler
            .handle(TranslateCommand::translate(thread(), "Hello", Language::Spanish))
            .await;
        let after = f.handler.handle(TranslateCommand::peek(thread())).await.unwrap();

        assert!(matches!(result, Err(TranslateError::Provider(_))));
        assert!(after.history.is_empty());
        assert_eq!(after.total_translations, 0);
    }

    #[tokio::test]
    async fn counter_failure_after_append_still_succeeds() {
        let store = CounterDownStore(InMemoryThreadStateStore::new());
        let handler = TranslateHandler::new(
            TranslationEngine::new(Arc::new(hola())),
            HistoryManager::new(Arc::new(store.clone())),
        );

        let result = handler
            .handle(TranslateCommand::translate(thread(), "Hello", Language::Spanish))
            .await
            .unwrap();

        assert_eq!(result.translation, "Hola");
        assert_eq!(result.translation_count(), 1);
        assert_eq!(result.total_translations, 1);

        let stored = HistoryManager::new(Arc::new(store)).read(&thread()).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn malformed_model_output_leaves_state_untouched() {
        let f = fixture(MockAIProvider::new().with_response("Hola"));

        let result = f
            .handler
            .handle(TranslateCommand::translate(thread(), "Hello", Language::Spanish))
            .await;
        let after = f.handler.handle(TranslateCommand::peek(thread())).await.unwrap();

        assert!(matches!(result, Err(TranslateError::InvalidModelOutput(_))));
        assert!(after.history.is_empty());
    }

    #[tokio::test]
    async fn selected_model_is_used_and_recorded() {
        let f = fixture(hola());

        let result = f
            .handler
            .handle(
                TranslateCommand::translate(thread(), "Hello", Language::Spanish)
                    .with_model(ModelName::Gpt5),
            )
            .await
            .unwrap();

        assert_eq!(f.provider.get_calls()[0].model.as_deref(), Some("gpt-5"));
        assert_eq!(result.history.entries()[0].model, ModelName::Gpt5);
    }

    #[tokio::test]
    async fn failing_eval_does_not_change_response() {
        let judge = MockAIProvider::new()
            .with_json_response(json!({"correct": false, "reason": "Not Spanish"}), 3);
        let reporter = InMemoryEvalReporter::new();
        let harness = Arc::new(
            EvalHarness::new(Arc::new(reporter.clone()))
                .with_eval(Arc::new(ThresholdEval::politeness(
                    Arc::new(StaticScorer::new(0.9)),
                    Score::try_new(0.7).unwrap(),
                )))
                .with_eval(Arc::new(CorrectLanguageEval::new(Arc::new(judge), "gpt-5-nano"))),
        );
        let f = fixture(hola());
        let handler = f.handler.clone().with_evals(harness);

        let result = handler
            .handle(TranslateCommand::translate(thread(), "Hello", Language::Spanish))
            .await
            .unwrap();

        assert_eq!(result.translation, "Hola");
        assert_eq!(result.tokens, 12);

        let records = reporter.wait_for(2, Duration::from_secs(2)).await;
        assert_eq!(records.len(), 2);
        assert!(reporter.find("politeness").await.unwrap().verdict.passed);
        assert!(!reporter.find("correct-language").await.unwrap().verdict.passed);
    }

    #[tokio::test]
    async fn evals_do_not_run_for_peek_or_clear() {
        let reporter = InMemoryEvalReporter::new();
        let harness = Arc::new(EvalHarness::new(Arc::new(reporter.clone())).with_eval(Arc::new(
            ThresholdEval::politeness(Arc::new(StaticScorer::new(0.9)), Score::try_new(0.7).unwrap()),
        )));
        let handler = fixture(hola()).handler.with_evals(harness);

        handler.handle(TranslateCommand::peek(thread())).await.unwrap();
        handler.handle(TranslateCommand::clear(thread())).await.unwrap();

        let records = reporter.wait_for(1, Duration::from_millis(50)).await;
        assert!(records.is_empty());
    }

    #[test]
    fn command_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<Command>("\"clear\"").unwrap(),
            Command::Clear
        );
        assert!(serde_json::from_str::<Command>("\"reset\"").is_err());
        assert_eq!(Command::default(), Command::Translate);
    }
}
