//! Error types for deckforge operations.
//!
//! The prompt builders themselves never fail: missing optional inputs degrade
//! to empty substitutions or sentinel phrases. Errors exist only at the edges:
//! - Configuration loading from the environment
//! - Model-client implementations behind the [`crate::llm::ModelClient`] seam

use thiserror::Error;

/// Errors that can occur while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors that can occur inside a model-client implementation.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API credentials for the model client")]
    MissingCredentials,

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse model response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Context length exceeded: {limit} tokens")]
    ContextLengthExceeded { limit: u32 },

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
