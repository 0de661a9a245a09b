//! Translation domain - languages, models and bounded thread history.

mod history;
mod language;
mod model;
pub mod text;

pub use history::{HistoryEntry, TranslationHistory, HISTORY_LIMIT};
pub use language::Language;
pub use model::ModelName;
