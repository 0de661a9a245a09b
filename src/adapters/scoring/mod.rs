//! Scorer Adapters.
//!
//! - `LlmPolitenessScorer` - judge-model politeness rating
//! - `StaticScorer` - fixed score, for tests

mod llm_politeness_scorer;
mod static_scorer;

pub use llm_politeness_scorer::LlmPolitenessScorer;
pub use static_scorer::StaticScorer;
