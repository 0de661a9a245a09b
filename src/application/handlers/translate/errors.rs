//! Errors for the translate flow.

use thiserror::Error;

use crate::domain::foundation::ThreadId;
use crate::ports::{AIError, StateStoreError};

/// Errors that can occur while handling a translate or clear request.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The model call failed or returned nothing.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// The model answered, but not with `{"translation": string}`.
    #[error("Model returned an unusable translation: {0}")]
    InvalidModelOutput(String),

    /// The state store failed.
    #[error("State store error: {0}")]
    State(#[from] StateStoreError),

    /// Stored history could not be decoded.
    #[error("Stored history for thread {thread_id} is corrupt: {reason}")]
    CorruptHistory { thread_id: ThreadId, reason: String },

    /// Every compare-and-swap attempt lost to a concurrent writer.
    #[error("History for thread {thread_id} changed concurrently {attempts} times; giving up")]
    StateConflict { thread_id: ThreadId, attempts: u32 },
}
