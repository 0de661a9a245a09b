//! HTTP middleware for axum.
//!
//! - `thread` - thread identity resolution and the `ThreadContext` extractor

pub mod thread;

pub use thread::{thread_middleware, ThreadContext, THREAD_ID_HEADER};
