//! Translation behavior configuration

use serde::Deserialize;

use crate::domain::translation::{Language, ModelName};

use super::error::ValidationError;

/// Translation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    /// Target language when a request names none
    #[serde(default)]
    pub default_language: Language,

    /// Model when a request names none
    #[serde(default)]
    pub default_model: ModelName,

    /// Compare-and-swap attempts per history append
    #[serde(default = "default_max_append_attempts")]
    pub max_append_attempts: u32,
}

impl TranslationConfig {
    /// Validate translation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_append_attempts == 0 {
            return Err(ValidationError::InvalidAppendAttempts);
        }
        Ok(())
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            default_model: ModelName::default(),
            max_append_attempts: default_max_append_attempts(),
        }
    }
}

fn default_max_append_attempts() -> u32 {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_config_defaults() {
        let config = TranslationConfig::default();
        assert_eq!(config.default_language, Language::Spanish);
        assert_eq!(config.default_model, ModelName::Gpt5Nano);
        assert_eq!(config.max_append_attempts, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_attempts() {
        let config = TranslationConfig {
            max_append_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAppendAttempts)
        ));
    }
}
