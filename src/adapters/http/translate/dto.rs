//! HTTP DTOs for translate endpoints.
//!
//! These types decouple the HTTP API from the application types.

use serde::{Deserialize, Serialize};

use crate::application::handlers::translate::{Command, TranslateResult};
use crate::domain::translation::{HistoryEntry, Language, ModelName};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/translate`.
///
/// Every field is optional. Unknown languages, models or commands are rejected
/// during JSON extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub to_language: Option<Language>,
    #[serde(default)]
    pub model: Option<ModelName>,
    #[serde(default)]
    pub command: Option<Command>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body returned by `POST /api/translate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    /// Empty for peek and clear.
    pub translation: String,
    pub word_count: u32,
    pub tokens: u32,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
    pub thread_id: String,
    pub session_id: String,
    /// Entries in `history`.
    pub translation_count: usize,
    /// Translations since the last clear.
    pub total_translations: u64,
}

impl From<TranslateResult> for TranslationResponse {
    fn from(result: TranslateResult) -> Self {
        let translation_count = result.translation_count();
        Self {
            translation: result.translation,
            word_count: result.word_count,
            tokens: result.tokens,
            history: result.history.into_entries(),
            thread_id: result.thread_id.to_string(),
            session_id: result.session_id.to_string(),
            translation_count,
            total_translations: result.total_translations,
        }
    }
}

/// Body returned by the history endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub thread_id: String,
    pub translation_count: usize,
}

impl From<TranslateResult> for HistoryResponse {
    fn from(result: TranslateResult) -> Self {
        let translation_count = result.translation_count();
        Self {
            history: result.history.into_entries(),
            thread_id: result.thread_id.to_string(),
            translation_count,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new("UPSTREAM_ERROR", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
