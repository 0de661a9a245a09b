//! Language enum representing the supported translation targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Target languages the translator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Spanish,
    French,
    German,
    Chinese,
}

impl Language {
    /// Returns all supported languages in display order.
    pub fn all() -> &'static [Language] {
        &[
            Language::Spanish,
            Language::French,
            Language::German,
            Language::Chinese,
        ]
    }

    /// Returns the English display label.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    /// Parses a label case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::unknown_variant("to_language", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_english_label() {
        assert_eq!(Language::Chinese.to_string(), "Chinese");
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("french".parse::<Language>().unwrap(), Language::French);
        assert_eq!(" GERMAN ".parse::<Language>().unwrap(), Language::German);
    }

    #[test]
    fn rejects_unknown_language() {
        let err = "Klingon".parse::<Language>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownVariant { .. }));
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Language::Spanish).unwrap(),
            "\"Spanish\""
        );
        let parsed: Language = serde_json::from_str("\"German\"").unwrap();
        assert_eq!(parsed, Language::German);
    }

    #[test]
    fn deserialize_rejects_unknown_label() {
        assert!(serde_json::from_str::<Language>("\"Klingon\"").is_err());
    }
}
