//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - model providers (OpenAI-compatible, mock)
//! - `state` - thread state stores (Redis, in-memory)
//! - `scoring` - scorers backing threshold evals
//! - `evals` - eval verdict reporters
//! - `http` - axum routes and handlers

pub mod ai;
pub mod evals;
pub mod http;
pub mod scoring;
pub mod state;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use evals::{InMemoryEvalReporter, TracingEvalReporter};
pub use scoring::{LlmPolitenessScorer, StaticScorer};
pub use state::{InMemoryThreadStateStore, RedisThreadStateStore};
