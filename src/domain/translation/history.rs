//! Translation history value objects.
//!
//! A thread keeps its most recent translations newest-first. The sequence is
//! bounded: every prepend drops whatever falls past the limit, so the oldest
//! entries (by position) disappear first.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::text::{truncate_for_display, word_count};
use super::{Language, ModelName};

/// Default number of entries a thread retains.
pub const HISTORY_LIMIT: usize = 10;

/// One recorded translation.
///
/// `text` and `translation` are display copies cut to a fixed length;
/// `word_count` is computed from the full translation before cutting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub text: String,
    pub to_language: Language,
    pub translation: String,
    pub word_count: u32,
    pub timestamp: Timestamp,
    pub model: ModelName,
    pub tokens: u32,
    pub session_id: SessionId,
}

impl HistoryEntry {
    /// Records a completed translation.
    pub fn record(
        text: &str,
        to_language: Language,
        translation: &str,
        model: ModelName,
        tokens: u32,
        session_id: SessionId,
    ) -> Self {
        Self::record_at(
            text,
            to_language,
            translation,
            model,
            tokens,
            session_id,
            Timestamp::now(),
        )
    }

    /// Records a completed translation at an explicit instant.
    pub fn record_at(
        text: &str,
        to_language: Language,
        translation: &str,
        model: ModelName,
        tokens: u32,
        session_id: SessionId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            text: truncate_for_display(text),
            to_language,
            translation: truncate_for_display(translation),
            word_count: word_count(translation),
            timestamp,
            model,
            tokens,
            session_id,
        }
    }
}

/// Newest-first, size-bounded sequence of history entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationHistory(Vec<HistoryEntry>);

impl TranslationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps stored entries, enforcing `limit`.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, limit: usize) -> Self {
        entries.truncate(limit);
        Self(entries)
    }

    /// Returns a new history with `entry` at the front, trimmed to `limit`.
    pub fn prepended(&self, entry: HistoryEntry, limit: usize) -> Self {
        let mut entries = Vec::with_capacity(limit.min(self.0.len() + 1));
        entries.push(entry);
        entries.extend(self.0.iter().take(limit.saturating_sub(1)).cloned());
        entries.truncate(limit);
        Self(entries)
    }

    /// Returns the entries newest-first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    /// Returns the most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.0.first()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no translations are retained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the history, returning the entries newest-first.
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.0
    }
}
