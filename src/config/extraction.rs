//! Symptom classifier configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Symptom classifier configuration
///
/// Connection fields are optional. Missing ones are reported at startup and
/// surface as a spoken "trouble connecting" message at call time.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Base URL of the classifier API
    pub api_url: Option<String>,

    /// Classifier application key
    pub api_key: Option<Secret<String>>,

    /// Classifier application id
    pub app_id: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Age sent with every classification request
    #[serde(default = "default_placeholder_age")]
    pub placeholder_age: u32,

    /// Sex sent with every classification request
    #[serde(default = "default_placeholder_sex")]
    pub placeholder_sex: String,
}

impl ExtractionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if URL, key and app id are all present
    pub fn is_configured(&self) -> bool {
        self.api_url.as_ref().is_some_and(|u| !u.is_empty())
            && self.api_key.is_some()
            && self.app_id.as_ref().is_some_and(|a| !a.is_empty())
    }

    /// Validate extraction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.is_empty()) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidExtractionUrl);
            }
        }
        if self.placeholder_age > 130 {
            return Err(ValidationError::InvalidPlaceholderAge(self.placeholder_age));
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            app_id: None,
            timeout_secs: default_timeout(),
            placeholder_age: default_placeholder_age(),
            placeholder_sex: default_placeholder_sex(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_placeholder_age() -> u32 {
    30
}

fn default_placeholder_sex() -> String {
    "male".to_string()
}
