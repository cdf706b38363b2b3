//! Telephony provider configuration

use secrecy::Secret;
use serde::Deserialize;

/// Telephony provider configuration
///
/// Account credentials are only reported at startup; webhook handling never
/// needs them.
#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// Provider account id
    pub account_sid: Option<String>,

    /// Provider auth token
    pub auth_token: Option<Secret<String>>,

    /// Speech recognition language
    #[serde(default = "default_language")]
    pub language: String,

    /// Gather speech timeout ("auto" or seconds)
    #[serde(default = "default_speech_timeout")]
    pub speech_timeout: String,
}

impl TelephonyConfig {
    /// Check if account credentials are present
    pub fn has_credentials(&self) -> bool {
        self.account_sid.as_ref().is_some_and(|s| !s.is_empty()) && self.auth_token.is_some()
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            language: default_language(),
            speech_timeout: default_speech_timeout(),
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_speech_timeout() -> String {
    "auto".to_string()
}
