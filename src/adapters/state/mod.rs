//! Thread State Adapters
//!
//! Implementations of the ThreadStateStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryThreadStateStore** - process-local, for tests and single-node runs
//! - **RedisThreadStateStore** - shared across processes
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::state::{InMemoryThreadStateStore, RedisThreadStateStore};
//!
//! // Production: Redis
//! let store = RedisThreadStateStore::connect("redis://localhost:6379", None).await?;
//!
//! // Testing: in-memory
//! let store = InMemoryThreadStateStore::new();
//! ```

mod in_memory_thread_state;
mod redis_thread_state;

pub use in_memory_thread_state::InMemoryThreadStateStore;
pub use redis_thread_state::RedisThreadStateStore;
