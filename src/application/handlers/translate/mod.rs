//! Translate handlers.
//!
//! - `TranslationEngine` - prompt construction and the single model call
//! - `HistoryManager` - bounded per-thread history with optimistic appends
//! - `TranslateHandler` - command dispatch (translate / peek / clear)

mod errors;
mod history_manager;
mod translate_handler;
mod translation_engine;

pub use errors::TranslateError;
pub use history_manager::{HistoryManager, COUNT_KEY, DEFAULT_MAX_APPEND_ATTEMPTS, HISTORY_KEY};
pub use translate_handler::{Command, TranslateCommand, TranslateHandler, TranslateResult};
pub use translation_engine::{TranslationEngine, TranslationOutcome};
