//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `THREAD_TRANSLATOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use thread_translator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod error;
mod evals;
mod redis;
mod server;
mod translation;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use evals::EvalsConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use translation::TranslationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except the AI key, which `validate` requires.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenAI-compatible)
    #[serde(default)]
    pub ai: AiConfig,

    /// Redis configuration (thread state); in-memory when absent
    #[serde(default)]
    pub redis: RedisConfig,

    /// Translation defaults and history bounds
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Post-hoc eval settings
    #[serde(default)]
    pub evals: EvalsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `THREAD_TRANSLATOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `THREAD_TRANSLATOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `THREAD_TRANSLATOR__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("THREAD_TRANSLATOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.redis.validate()?;
        self.translation.validate()?;
        self.evals.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::translation::{Language, ModelName};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "THREAD_TRANSLATOR__AI__OPENAI_API_KEY",
        "THREAD_TRANSLATOR__SERVER__PORT",
        "THREAD_TRANSLATOR__SERVER__ENVIRONMENT",
        "THREAD_TRANSLATOR__REDIS__URL",
        "THREAD_TRANSLATOR__TRANSLATION__DEFAULT_LANGUAGE",
        "THREAD_TRANSLATOR__TRANSLATION__DEFAULT_MODEL",
        "THREAD_TRANSLATOR__EVALS__ENABLED",
    ];

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("THREAD_TRANSLATOR__AI__OPENAI_API_KEY", "sk-test-xxx");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-test-xxx"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 3500);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.redis.url(), None);
        assert_eq!(config.translation.max_append_attempts, 8);
        assert!(config.evals.enabled);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("THREAD_TRANSLATOR__SERVER__PORT", "3000"),
            ("THREAD_TRANSLATOR__REDIS__URL", "redis://localhost:6379"),
            ("THREAD_TRANSLATOR__TRANSLATION__DEFAULT_LANGUAGE", "French"),
            ("THREAD_TRANSLATOR__TRANSLATION__DEFAULT_MODEL", "gpt-5-mini"),
            ("THREAD_TRANSLATOR__EVALS__ENABLED", "false"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.redis.url(), Some("redis://localhost:6379"));
        assert_eq!(config.translation.default_language, Language::French);
        assert_eq!(config.translation.default_model, ModelName::Gpt5Mini);
        assert!(!config.evals.enabled);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("THREAD_TRANSLATOR__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }
}
