//! History manager: the thread's bounded history and translation counter.
//!
//! Appends are optimistic: read the slot, build the new history, and commit
//! only if the slot still holds what was read. A lost race re-reads and
//! recomputes, up to `max_append_attempts` times.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::foundation::ThreadId;
use crate::domain::translation::{HistoryEntry, TranslationHistory, HISTORY_LIMIT};
use crate::ports::{StateStoreError, ThreadStateStore};

use super::TranslateError;

/// State slot holding the serialized history.
pub const HISTORY_KEY: &str = "history";

/// State slot holding the number of translations since the last clear.
pub const COUNT_KEY: &str = "count";

/// Default number of compare-and-swap attempts per append.
pub const DEFAULT_MAX_APPEND_ATTEMPTS: u32 = 8;

#[derive(Clone)]
pub struct HistoryManager {
    store: Arc<dyn ThreadStateStore>,
    max_append_attempts: u32,
}

impl HistoryManager {
    pub fn new(store: Arc<dyn ThreadStateStore>) -> Self {
        Self {
            store,
            max_append_attempts: DEFAULT_MAX_APPEND_ATTEMPTS,
        }
    }

    /// Sets how many times a contended append is retried.
    pub fn with_max_append_attempts(mut self, attempts: u32) -> Self {
        self.max_append_attempts = attempts.max(1);
        self
    }

    /// Current history, newest-first. An untouched thread has an empty one.
    pub async fn read(&self, thread_id: &ThreadId) -> Result<TranslationHistory, TranslateError> {
        let raw = self.store.get(thread_id, HISTORY_KEY).await?;
        self.decode(thread_id, raw.as_ref())
    }

    /// Prepends `entry`, trims to `HISTORY_LIMIT`, and returns what was stored.
    pub async fn append(
        &self,
        thread_id: &ThreadId,
        entry: HistoryEntry,
    ) -> Result<TranslationHistory, TranslateError> {
        for attempt in 1..=self.max_append_attempts {
            let raw = self.store.get(thread_id, HISTORY_KEY).await?;
            let current = self.decode(thread_id, raw.as_ref())?;
            let updated = current.prepended(entry.clone(), HISTORY_LIMIT);
            let encoded = serde_json::to_value(&updated)
                .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;

            if self
                .store
                .compare_and_swap(thread_id, HISTORY_KEY, raw.as_ref(), encoded)
                .await?
            {
                return Ok(updated);
            }

            tracing::debug!(
                thread_id = %thread_id,
                attempt,
                "History changed concurrently, retrying append"
            );
            tokio::task::yield_now().await;
        }

        tracing::warn!(
            thread_id = %thread_id,
            attempts = self.max_append_attempts,
            "History append abandoned after repeated conflicts"
        );
        Err(TranslateError::StateConflict {
            thread_id: thread_id.clone(),
            attempts: self.max_append_attempts,
        })
    }

    /// Resets the counter, then empties the history.
    ///
    /// The two writes are not atomic. If the second fails, the thread keeps
    /// its history with a reset counter, and the error tells the caller to
    /// clear again. A counter never outlives the history it counts.
    pub async fn clear(&self, thread_id: &ThreadId) -> Result<(), TranslateError> {
        self.store.delete(thread_id, COUNT_KEY).await?;
        self.store
            .set(thread_id, HISTORY_KEY, Value::Array(Vec::new()))
            .await?;
        Ok(())
    }

    /// Translations recorded since the last clear.
    pub async fn count(&self, thread_id: &ThreadId) -> Result<u64, TranslateError> {
        let raw = self.store.get(thread_id, COUNT_KEY).await?;
        match raw {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| {
                TranslateError::State(StateStoreError::NotACounter {
                    key: COUNT_KEY.to_string(),
                })
            }),
        }
    }

    /// Bumps the counter and returns its new value.
    pub async fn increment_count(&self, thread_id: &ThreadId) -> Result<u64, TranslateError> {
        let count = self.store.increment(thread_id, COUNT_KEY).await?;
        Ok(count.max(0) as u64)
    }

    fn decode(
        &self,
        thread_id: &ThreadId,
        raw: Option<&Value>,
    ) -> Result<TranslationHistory, TranslateError> {
        let Some(value) = raw else {
            return Ok(TranslationHistory::new());
        };

        let entries: Vec<HistoryEntry> =
            serde_json::from_value(value.clone()).map_err(|e| TranslateError::CorruptHistory {
                thread_id: thread_id.clone(),
                reason: e.to_string(),
            })?;

        Ok(TranslationHistory::from_entries(entries, HISTORY_LIMIT))
    }
}
