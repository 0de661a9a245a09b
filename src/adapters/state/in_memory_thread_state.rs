//! In-Memory Thread State Adapter
//!
//! Keeps every slot in a process-local map. Compare-and-swap and increment
//! run under the map's write lock, so they are atomic within one process.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ThreadId;
use crate::ports::{StateStoreError, ThreadStateStore};

type SlotKey = (ThreadId, String);

/// In-memory storage for thread state
#[derive(Debug, Clone, Default)]
pub struct InMemoryThreadStateStore {
    slots: Arc<RwLock<HashMap<SlotKey, Value>>>,
}

impl InMemoryThreadStateStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.slots.write().await.clear();
    }

    /// Get the number of occupied slots
    pub async fn slot_count(&self) -> usize {
        self.slots.read().await.len()
    }

    fn slot(thread_id: &ThreadId, key: &str) -> SlotKey {
        (thread_id.clone(), key.to_string())
    }
}

#[async_trait]
impl ThreadStateStore for InMemoryThreadStateStore {
    async fn get(&self, thread_id: &ThreadId, key: &str) -> Result<Option<Value>, StateStoreError> {
        let slots = self.slots.read().await;
        Ok(slots.get(&Self::slot(thread_id, key)).cloned())
    }

    async fn set(
        &self,
        thread_id: &ThreadId,
        key: &str,
        value: Value,
    ) -> Result<(), StateStoreError> {
        let mut slots = self.slots.write().await;
        slots.insert(Self::slot(thread_id, key), value);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        thread_id: &ThreadId,
        key: &str,
        expected: Option<&Value>,
        new: Value,
    ) -> Result<bool, StateStoreError> {
        let mut slots = self.slots.write().await;
        let slot = Self::slot(thread_id, key);

        if slots.get(&slot) != expected {
            return Ok(false);
        }

        slots.insert(slot, new);
        Ok(true)
    }

    async fn increment(&self, thread_id: &ThreadId, key: &str) -> Result<i64, StateStoreError> {
        let mut slots = self.slots.write().await;
        let slot = Self::slot(thread_id, key);

        let current = match slots.get(&slot) {
            None => 0,
            Some(value) => value.as_i64().ok_or_else(|| StateStoreError::NotACounter {
                key: key.to_string(),
            })?,
        };

        let next = current + 1;
        slots.insert(slot, Value::from(next));
        Ok(next)
    }

    async fn delete(&self, thread_id: &ThreadId, key: &str) -> Result<(), StateStoreError> {
        self.slots.write().await.remove(&Self::slot(thread_id, key));
        Ok(())
    }
}
