//! Redis-backed thread state for multi-process deployments.
//!
//! Each slot is one Redis string at `thread:{thread_id}:{key}` holding the
//! value's JSON encoding. Counters use INCR, so their stored form is a bare
//! integer, which is also valid JSON.
//!
//! Compare-and-swap runs as a Lua script so the read and the conditional
//! write happen in one server-side step. The comparison is on the encoded
//! form; values written through this adapter are always encoded by
//! `serde_json`, which is deterministic for a given `Value`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Script};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::foundation::ThreadId;
use crate::ports::{StateStoreError, ThreadStateStore};

/// KEYS[1] = slot, ARGV[1] = expected encoding ("" = absent),
/// ARGV[2] = new encoding, ARGV[3] = ttl seconds (0 = none).
const COMPARE_AND_SWAP_LUA: &str = r#"
local current = redis.call('GET', KEYS[1])
if current == false then
  current = ''
end
if current ~= ARGV[1] then
  return 0
end
local ttl = tonumber(ARGV[3])
if ttl > 0 then
  redis.call('SET', KEYS[1], ARGV[2], 'EX', ttl)
else
  redis.call('SET', KEYS[1], ARGV[2])
end
return 1
"#;

/// Redis-backed ThreadStateStore.
///
/// An optional TTL bounds how long an idle thread's state survives; every
/// write refreshes it.
#[derive(Clone)]
pub struct RedisThreadStateStore {
    conn: MultiplexedConnection,
    cas_script: Arc<Script>,
    ttl_secs: Option<u64>,
}

impl RedisThreadStateStore {
    /// Wraps an existing connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            cas_script: Arc::new(Script::new(COMPARE_AND_SWAP_LUA)),
            ttl_secs: None,
        }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, ttl_secs: Option<u64>) -> Result<Self, StateStoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StateStoreError::Unavailable(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StateStoreError::Unavailable(e.to_string()))?;

        Ok(Self::new(conn).with_ttl(ttl_secs))
    }

    /// Sets the per-slot expiry applied on every write.
    pub fn with_ttl(mut self, ttl_secs: Option<u64>) -> Self {
        self.ttl_secs = ttl_secs.filter(|secs| *secs > 0);
        self
    }

    fn redis_key(thread_id: &ThreadId, key: &str) -> String {
        format!("thread:{}:{}", thread_id, key)
    }

    fn encode(value: &Value) -> Result<String, StateStoreError> {
        serde_json::to_string(value).map_err(|e| StateStoreError::SerializationFailed(e.to_string()))
    }

    async fn refresh_ttl(
        &self,
        conn: &mut MultiplexedConnection,
        redis_key: &str,
    ) -> Result<(), StateStoreError> {
        if let Some(ttl) = self.ttl_secs {
            conn.expire::<_, ()>(redis_key, ttl as i64)
                .await
                .map_err(unavailable)?;
        }
        Ok(())
    }
}

fn unavailable(e: redis::RedisError) -> StateStoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_timeout() {
        StateStoreError::Unavailable(e.to_string())
    } else {
        StateStoreError::Backend(e.to_string())
    }
}

#[async_trait]
impl ThreadStateStore for RedisThreadStateStore {
    async fn get(&self, thread_id: &ThreadId, key: &str) -> Result<Option<Value>, StateStoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(Self::redis_key(thread_id, key))
            .await
            .map_err(unavailable)?;

        raw.map(|s| {
            serde_json::from_str(&s).map_err(|e| StateStoreError::DeserializationFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
    }

    async fn set(
        &self,
        thread_id: &ThreadId,
        key: &str,
        value: Value,
    ) -> Result<(), StateStoreError> {
        let redis_key = Self::redis_key(thread_id, key);
        let encoded = Self::encode(&value)?;
        let mut conn = self.conn.clone();

        conn.set::<_, _, ()>(&redis_key, encoded)
            .await
            .map_err(unavailable)?;
        self.refresh_ttl(&mut conn, &redis_key).await
    }

    async fn compare_and_swap(
        &self,
        thread_id: &ThreadId,
        key: &str,
        expected: Option<&Value>,
        new: Value,
    ) -> Result<bool, StateStoreError> {
        let expected = match expected {
            Some(value) => Self::encode(value)?,
            None => String::new(),
        };
        let new = Self::encode(&new)?;
        let mut conn = self.conn.clone();

        let swapped: i64 = self
            .cas_script
            .key(Self::redis_key(thread_id, key))
            .arg(expected)
            .arg(new)
            .arg(self.ttl_secs.unwrap_or(0))
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(swapped == 1)
    }

    async fn increment(&self, thread_id: &ThreadId, key: &str) -> Result<i64, StateStoreError> {
        let redis_key = Self::redis_key(thread_id, key);
        let mut conn = self.conn.clone();

        let count: i64 = conn.incr(&redis_key, 1_i64).await.map_err(|e| {
            if e.kind() == redis::ErrorKind::TypeError || e.kind() == redis::ErrorKind::ResponseError
            {
                StateStoreError::NotACounter {
                    key: key.to_string(),
                }
            } else {
                unavailable(e)
            }
        })?;

        self.refresh_ttl(&mut conn, &redis_key).await?;
        Ok(count)
    }

    async fn delete(&self, thread_id: &ThreadId, key: &str) -> Result<(), StateStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::redis_key(thread_id, key))
            .await
            .map_err(unavailable)
    }
}
