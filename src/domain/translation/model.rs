//! Model names a caller may pick for a translation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Chat models exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelName {
    #[default]
    #[serde(rename = "gpt-5-nano")]
    Gpt5Nano,
    #[serde(rename = "gpt-5-mini")]
    Gpt5Mini,
    #[serde(rename = "gpt-5")]
    Gpt5,
}

impl ModelName {
    /// Returns all selectable models.
    pub fn all() -> &'static [ModelName] {
        &[ModelName::Gpt5Nano, ModelName::Gpt5Mini, ModelName::Gpt5]
    }

    /// Returns the provider-facing model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt5Nano => "gpt-5-nano",
            ModelName::Gpt5Mini => "gpt-5-mini",
            ModelName::Gpt5 => "gpt-5",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelName::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ValidationError::unknown_variant("model", s))
    }
}
