//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRIAGE_FLOW` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use triage_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod extraction;
mod server;
mod telephony;
mod voice;

pub use error::{ConfigError, ValidationError};
pub use extraction::ExtractionConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use telephony::TelephonyConfig;
pub use voice::VoiceConfig;

use serde::Deserialize;

/// Unprefixed variable names still honored when the prefixed key is absent.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("extraction.api_url", "INFORMEDICA_API_URL"),
    ("extraction.api_key", "INFORMEDICA_API_KEY"),
    ("extraction.app_id", "INFORMEDICA_APP_ID"),
    ("telephony.account_sid", "TWILIO_ACCOUNT_SID"),
    ("telephony.auth_token", "TWILIO_AUTH_TOKEN"),
];

/// Root application configuration
///
/// Every section has defaults, so the service starts with no environment at
/// all; the classifier then answers every call with a connection apology.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Symptom classifier configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Telephony provider configuration
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Synthesized voice configuration
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds defaults from the legacy unprefixed variables
    /// 3. Reads environment variables with `TRIAGE_FLOW` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TRIAGE_FLOW__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRIAGE_FLOW__EXTRACTION__API_URL=...` -> `extraction.api_url = ...`
    /// - `INFORMEDICA_API_URL=...` -> `extraction.api_url` unless the prefixed
    ///   variable is also set
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (key, var) in LEGACY_ENV {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("TRIAGE_FLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Missing classifier credentials are not an error.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.extraction.validate()?;
        self.voice.validate()?;

        if self.server.request_timeout_secs <= self.extraction.timeout_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                extraction_secs: self.extraction.timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
