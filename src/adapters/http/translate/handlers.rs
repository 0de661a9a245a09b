//! HTTP handlers for translate endpoints.
//!
//! These handlers connect Axum routes to the translate command handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::ThreadContext;
use crate::application::handlers::translate::{
    Command, TranslateCommand, TranslateError, TranslateHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::translation::{Language, ModelName};
use crate::ports::StateStoreError;

use super::dto::{ErrorResponse, HistoryResponse, TranslationRequest, TranslationResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for translate handlers.
#[derive(Clone)]
pub struct TranslateAppState {
    pub handler: Arc<TranslateHandler>,
    /// Used when a request omits `toLanguage`.
    pub default_language: Language,
    /// Used when a request omits `model`.
    pub default_model: ModelName,
}

impl TranslateAppState {
    pub fn new(handler: Arc<TranslateHandler>) -> Self {
        Self {
            handler,
            default_language: Language::default(),
            default_model: ModelName::default(),
        }
    }

    pub fn with_defaults(mut self, language: Language, model: ModelName) -> Self {
        self.default_language = language;
        self.default_model = model;
        self
    }

    fn command(&self, thread: ThreadContext, request: TranslationRequest) -> TranslateCommand {
        TranslateCommand {
            thread_id: thread.thread_id,
            session_id: SessionId::new(),
            text: request.text,
            to_language: request.to_language.unwrap_or(self.default_language),
            model: request.model.unwrap_or(self.default_model),
            command: request.command.unwrap_or_default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/translate
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/translate - Translate text, peek at history, or clear it.
///
/// # Errors
/// - 400 Bad Request: body is not a valid `TranslationRequest`
/// - 409 Conflict: history append lost too many concurrent races
/// - 502 Bad Gateway: model call failed or returned unusable output
/// - 503 Service Unavailable: state store unreachable
pub async fn post_translate(
    State(state): State<TranslateAppState>,
    thread: ThreadContext,
    body: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TranslateApiError> {
    let Json(request) = body.map_err(|e| TranslateApiError::BadRequest(e.body_text()))?;

    let result = state.handler.handle(state.command(thread, request)).await?;

    Ok((StatusCode::OK, Json(TranslationResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /api/translate/history
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/translate/history - Current history of the thread.
pub async fn get_history(
    State(state): State<TranslateAppState>,
    thread: ThreadContext,
) -> Result<impl IntoResponse, TranslateApiError> {
    let result = state
        .handler
        .handle(TranslateCommand::peek(thread.thread_id))
        .await?;

    Ok((StatusCode::OK, Json(HistoryResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// DELETE /api/translate/history
// ════════════════════════════════════════════════════════════════════════════════

/// DELETE /api/translate/history - Clear the thread's history and counter.
pub async fn delete_history(
    State(state): State<TranslateAppState>,
    thread: ThreadContext,
) -> Result<impl IntoResponse, TranslateApiError> {
    let request = TranslationRequest {
        command: Some(Command::Clear),
        ..Default::default()
    };
    let result = state.handler.handle(state.command(thread, request)).await?;

    Ok((StatusCode::OK, Json(HistoryResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for translate endpoints.
#[derive(Debug)]
pub enum TranslateApiError {
    BadRequest(String),
    Upstream(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl From<TranslateError> for TranslateApiError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::Provider(_) | TranslateError::InvalidModelOutput(_) => {
                TranslateApiError::Upstream(err.to_string())
            }
            TranslateError::StateConflict { .. } => TranslateApiError::Conflict(err.to_string()),
            TranslateError::State(StateStoreError::Unavailable(_)) => {
                TranslateApiError::Unavailable(err.to_string())
            }
            TranslateError::State(_) | TranslateError::CorruptHistory { .. } => {
                TranslateApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for TranslateApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            TranslateApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            TranslateApiError::Upstream(msg) => {
                tracing::warn!(error = %msg, "Translation failed upstream");
                (StatusCode::BAD_GATEWAY, ErrorResponse::upstream(msg))
            }
            TranslateApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::conflict(msg)),
            TranslateApiError::Unavailable(msg) => {
                tracing::error!(error = %msg, "State store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::unavailable("Thread state is temporarily unavailable"),
                )
            }
            TranslateApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
