//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through the ports.

pub mod translate;

pub use translate::{
    Command, HistoryManager, TranslateCommand, TranslateError, TranslateHandler, TranslateResult,
    TranslationEngine,
};
