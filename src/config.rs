//! Engine configuration loaded from the environment.
//!
//! The only process-wide setting the prompt engine reads is the default
//! output language, consulted by the language policy whenever a stage call
//! does not name a language explicitly.

use crate::error::ConfigError;
use crate::prompts::language::LanguageCode;

/// Configuration for the prompt composition engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Default output language applied when a stage call omits one.
    pub output_language: LanguageCode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_language: LanguageCode::En,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OUTPUT_LANGUAGE`: default output language, one of `zh`, `ja`, `en`,
    ///   `auto` (default: `en`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `OUTPUT_LANGUAGE` is set to a
    /// value outside the supported set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("OUTPUT_LANGUAGE") {
            config.output_language =
                LanguageCode::parse(&val).ok_or_else(|| ConfigError::InvalidValue {
                    key: "OUTPUT_LANGUAGE".to_string(),
                    message: format!("'{}' is not one of zh, ja, en, auto", val),
                })?;
        }

        Ok(config)
    }
}
