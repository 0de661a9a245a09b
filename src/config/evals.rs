//! Eval harness configuration

use serde::Deserialize;

use crate::application::evals::ThresholdEval;

use super::error::ValidationError;

/// Eval configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvalsConfig {
    /// Run evals after each translation
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum politeness score that passes
    #[serde(default = "default_politeness_threshold")]
    pub politeness_threshold: f64,

    /// Model used by judge-backed evals and scorers
    #[serde(default = "default_judge_model")]
    pub judge_model: String,
}

impl EvalsConfig {
    /// Validate eval configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.politeness_threshold) {
            return Err(ValidationError::InvalidThreshold);
        }
        if self.enabled && self.judge_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("JUDGE_MODEL"));
        }
        Ok(())
    }
}

impl Default for EvalsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            politeness_threshold: default_politeness_threshold(),
            judge_model: default_judge_model(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_politeness_threshold() -> f64 {
    ThresholdEval::DEFAULT_THRESHOLD
}

fn default_judge_model() -> String {
    "gpt-5-nano".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evals_config_defaults() {
        let config = EvalsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.politeness_threshold, 0.7);
        assert_eq!(config.judge_model, "gpt-5-nano");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_threshold_range() {
        let config = EvalsConfig {
            politeness_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidThreshold)
        ));
    }

    #[test]
    fn test_validation_requires_judge_model_when_enabled() {
        let config = EvalsConfig {
            judge_model: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("JUDGE_MODEL"))
        ));
    }

    #[test]
    fn test_disabled_evals_skip_judge_check() {
        let config = EvalsConfig {
            enabled: false,
            judge_model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
