//! Thread State Port - per-thread key/value storage.
//!
//! Every value lives in a slot addressed by `(ThreadId, key)`. Values are
//! JSON documents so adapters stay agnostic of what the application keeps
//! in them.
//!
//! # Concurrency
//!
//! `get` followed by `set` is not atomic. Callers that read-modify-write a
//! slot must use `compare_and_swap` and retry on `false`.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::ThreadId;

/// Errors that can occur during thread state operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state for key '{key}': {reason}")]
    DeserializationFailed { key: String, reason: String },

    #[error("Value for key '{key}' is not a counter")]
    NotACounter { key: String },

    #[error("State store error: {0}")]
    Backend(String),
}

/// Port for thread-scoped key/value state
#[async_trait]
pub trait ThreadStateStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the slot is empty.
    async fn get(&self, thread_id: &ThreadId, key: &str) -> Result<Option<Value>, StateStoreError>;

    /// Unconditionally overwrites the slot.
    async fn set(&self, thread_id: &ThreadId, key: &str, value: Value)
        -> Result<(), StateStoreError>;

    /// Writes `new` only if the slot still holds `expected` (`None` = empty).
    ///
    /// Returns `true` when the write happened, `false` when another writer
    /// got there first.
    async fn compare_and_swap(
        &self,
        thread_id: &ThreadId,
        key: &str,
        expected: Option<&Value>,
        new: Value,
    ) -> Result<bool, StateStoreError>;

    /// Atomically adds one to an integer slot (empty counts as 0) and returns
    /// the new value.
    async fn increment(&self, thread_id: &ThreadId, key: &str) -> Result<i64, StateStoreError>;

    /// Empties the slot. Deleting an empty slot is not an error.
    async fn delete(&self, thread_id: &ThreadId, key: &str) -> Result<(), StateStoreError>;
}
