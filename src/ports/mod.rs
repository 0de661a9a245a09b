//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - chat completions from a language model
//! - `ThreadStateStore` - per-thread key/value state
//! - `Scorer` - generic `{request, response}` quality scoring
//! - `EvalReporter` - sink for eval verdicts

mod ai_provider;
mod eval_reporter;
mod scorer;
mod thread_state;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, ResponseFormat, TokenUsage,
};
pub use eval_reporter::EvalReporter;
pub use scorer::{Scorer, ScorerError, ScorerInput, ScorerOutput};
pub use thread_state::{StateStoreError, ThreadStateStore};
