//! Application layer - command handlers and the eval harness.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod evals;
pub mod handlers;

pub use handlers::{
    Command, HistoryManager, TranslateCommand, TranslateError, TranslateHandler, TranslateResult,
    TranslationEngine,
};
