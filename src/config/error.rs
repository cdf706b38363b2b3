//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout ({request_secs}s) must exceed extraction timeout ({extraction_secs}s)")]
    RequestTimeoutTooShort {
        request_secs: u64,
        extraction_secs: u64,
    },

    #[error("Extraction API URL must use http or https")]
    InvalidExtractionUrl,

    #[error("Placeholder age {0} is outside 0..=130")]
    InvalidPlaceholderAge(u32),

    #[error("Voice name must not be empty")]
    EmptyVoiceName,
}
