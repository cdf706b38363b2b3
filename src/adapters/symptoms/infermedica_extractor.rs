//! Infermedica Extractor - Implementation of SymptomExtractor for the
//! Infermedica `/parse` endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = InfermedicaConfig::new()
//!     .with_base_url("https://api.infermedica.com/v3")
//!     .with_credentials("app-id", "app-key")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let extractor = InfermedicaExtractor::new(config)?;
//! ```
//!
//! # Demographics
//!
//! The service never asks callers for age or sex. Every request carries the
//! same placeholder demographics, which is a known limitation of the
//! classification it gets back.
//!
//! # Retries
//!
//! None. A slow or failed call becomes `ExtractionError::Unreachable` and the
//! caller is asked to try again, so the webhook answer is never held up.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ExtractionConfig;
use crate::domain::triage::Symptom;
use crate::ports::{ExtractionError, ExtractorInfo, NoSymptoms, SymptomExtractor};

const SYMPTOM_MENTION: &str = "symptom";

/// Configuration for the Infermedica extractor.
///
/// Every connection field is optional: a missing one surfaces as
/// `ExtractionError::Unconfigured` when a call is attempted.
#[derive(Debug, Clone)]
pub struct InfermedicaConfig {
    /// Base URL of the API, without the `/parse` suffix.
    pub base_url: Option<String>,
    /// Application id sent as `App-Id`.
    pub app_id: Option<String>,
    /// Application key sent as `App-Key`.
    app_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
    /// Age sent with every request.
    pub placeholder_age: u32,
    /// Sex sent with every request.
    pub placeholder_sex: String,
}

impl Default for InfermedicaConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl InfermedicaConfig {
    /// Creates an unconfigured instance with default timeout and placeholders.
    pub fn new() -> Self {
        Self {
            base_url: None,
            app_id: None,
            app_key: None,
            timeout: Duration::from_secs(30),
            placeholder_age: 30,
            placeholder_sex: "male".to_string(),
        }
    }

    /// Builds the adapter configuration from application settings.
    pub fn from_settings(settings: &ExtractionConfig) -> Self {
        let mut config = Self::new()
            .with_timeout(settings.timeout())
            .with_placeholders(settings.placeholder_age, settings.placeholder_sex.clone());
        config.base_url = non_blank(settings.api_url.as_deref());
        config.app_id = non_blank(settings.app_id.as_deref());
        config.app_key = settings
            .api_key
            .as_ref()
            .and_then(|key| non_blank(Some(key.expose_secret().as_str())))
            .map(Secret::new);
        config
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the application id and key.
    pub fn with_credentials(mut self, app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self.app_key = Some(Secret::new(app_key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the placeholder demographics.
    pub fn with_placeholders(mut self, age: u32, sex: impl Into<String>) -> Self {
        self.placeholder_age = age;
        self.placeholder_sex = sex.into();
        self
    }

    /// True when URL, id and key are all present.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.app_id.is_some() && self.app_key.is_some()
    }

    fn endpoint(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}/parse", base.trim_end_matches('/')))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Infermedica symptom extractor.
pub struct InfermedicaExtractor {
    config: InfermedicaConfig,
    client: Client,
}

impl InfermedicaExtractor {
    /// Creates an extractor whose HTTP client enforces the configured timeout.
    pub fn new(config: InfermedicaConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn to_parse_request<'a>(&'a self, utterance: &'a str) -> ParseRequest<'a> {
        ParseRequest {
            text: utterance,
            age: Age {
                value: self.config.placeholder_age,
            },
            sex: &self.config.placeholder_sex,
            kind: "symptoms",
        }
    }

    /// Maps a transport error, distinguishing timeouts in the logs.
    fn transport_error(&self, err: reqwest::Error) -> ExtractionError {
        if err.is_timeout() {
            tracing::warn!(
                timeout_secs = self.config.timeout.as_secs(),
                "Symptom classifier timed out"
            );
            ExtractionError::unreachable(format!(
                "timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if err.is_connect() {
            tracing::error!(error = %err, "Could not connect to symptom classifier");
            ExtractionError::unreachable(format!("connection failed: {}", err))
        } else {
            tracing::error!(error = %err, "Symptom classifier request failed");
            ExtractionError::unreachable(err.to_string())
        }
    }
}

/// Picks the symptom names out of a parse response, in response order.
fn symptoms_from(response: ParseResponse) -> Result<Vec<Symptom>, ExtractionError> {
    let mentions = response.mentions.unwrap_or_default();
    if mentions.is_empty() {
        return Err(ExtractionError::NoSymptomsFound(NoSymptoms::NoMentions));
    }

    let symptoms: Vec<Symptom> = mentions
        .into_iter()
        .filter(|m| m.kind.as_deref() == Some(SYMPTOM_MENTION))
        .filter_map(|m| {
            let name = non_blank(m.common_name.as_deref()).or_else(|| non_blank(m.name.as_deref()))?;
            Symptom::new(name).ok()
        })
        .collect();

    if symptoms.is_empty() {
        return Err(ExtractionError::NoSymptomsFound(NoSymptoms::NoSymptomMentions));
    }
    Ok(symptoms)
}

#[async_trait]
impl SymptomExtractor for InfermedicaExtractor {
    async fn extract(&self, utterance: &str) -> Result<Vec<Symptom>, ExtractionError> {
        let (Some(endpoint), Some(app_id), Some(app_key)) = (
            self.config.endpoint(),
            self.config.app_id.as_deref(),
            self.config.app_key.as_ref(),
        ) else {
            tracing::error!(
                url_present = self.config.base_url.is_some(),
                app_id_present = self.config.app_id.is_some(),
                key_present = self.config.app_key.is_some(),
                "Infermedica URL, API key, or App ID not set"
            );
            return Err(ExtractionError::Unconfigured);
        };

        tracing::debug!(endpoint = %endpoint, app_id, "Sending utterance to symptom classifier");

        let response = self
            .client
            .post(&endpoint)
            .header("App-Id", app_id)
            .header("App-Key", app_key.expose_secret())
            .json(&self.to_parse_request(utterance))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Symptom classifier responded");

        match status {
            StatusCode::OK => {}
            StatusCode::FORBIDDEN => {
                tracing::error!("Authentication failed with symptom classifier");
                return Err(ExtractionError::AuthFailed);
            }
            other => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status = other.as_u16(), body = %body, "Unexpected classifier status");
                return Err(ExtractionError::upstream(other.as_u16()));
            }
        }

        let parsed: ParseResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Unreadable classifier response");
            ExtractionError::unreachable(format!("invalid response body: {}", e))
        })?;

        let result = symptoms_from(parsed);
        match &result {
            Ok(symptoms) => tracing::info!(count = symptoms.len(), "Extracted symptoms"),
            Err(e) => tracing::info!(code = e.code(), "Classifier found no symptoms"),
        }
        result
    }

    fn extractor_info(&self) -> ExtractorInfo {
        ExtractorInfo::new(
            "infermedica",
            self.config.endpoint(),
            self.config.is_configured(),
        )
    }
}

// ----- Infermedica API Types -----

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
    age: Age,
    sex: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Serialize)]
struct Age {
    value: u32,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    mentions: Option<Vec<Mention>>,
}

#[derive(Debug, Deserialize)]
struct Mention {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    common_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configured(server: &MockServer) -> InfermedicaExtractor {
        let config = InfermedicaConfig::new()
            .with_base_url(server.uri())
            .with_credentials("test-app", "test-key")
            .with_timeout(Duration::from_millis(500));
        InfermedicaExtractor::new(config).unwrap()
    }

    async fn respond_with(body: serde_json::Value) -> Result<Vec<Symptom>, ExtractionError> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        configured(&server).extract("anything").await
    }

    fn names(symptoms: &[Symptom]) -> Vec<&str> {
        symptoms.iter().map(Symptom::display_name).collect()
    }

    mod config {
        use super::*;

        #[test]
        fn builder_works() {
            let config = InfermedicaConfig::new()
                .with_base_url("https://api.example.com/v3/")
                .with_credentials("id", "key")
                .with_timeout(Duration::from_secs(5))
                .with_placeholders(45, "female");

            assert!(config.is_configured());
            assert_eq!(config.endpoint().unwrap(), "https://api.example.com/v3/parse");
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.placeholder_age, 45);
            assert_eq!(config.app_key.unwrap().expose_secret(), "key");
        }

        #[test]
        fn defaults_match_fixed_placeholders() {
            let config = InfermedicaConfig::default();
            assert!(!config.is_configured());
            assert_eq!(config.timeout, Duration::from_secs(30));
            assert_eq!(config.placeholder_age, 30);
            assert_eq!(config.placeholder_sex, "male");
        }

        #[test]
        fn blank_settings_count_as_missing() {
            let settings = ExtractionConfig {
                api_url: Some("https://api.example.com".into()),
                api_key: Some(Secret::new("  ".to_string())),
                app_id: Some("id".into()),
                ..Default::default()
            };
            let config = InfermedicaConfig::from_settings(&settings);
            assert!(config.app_key.is_none());
            assert!(!config.is_configured());
        }
    }

    mod requests {
        use super::*;

        #[tokio::test]
        async fn sends_credentials_and_placeholder_demographics() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/parse"))
                .and(header("App-Id", "test-app"))
                .and(header("App-Key", "test-key"))
                .and(body_json(json!({
                    "text": "I have a headache",
                    "age": {"value": 30},
                    "sex": "male",
                    "type": "symptoms"
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "mentions": [{"type": "symptom", "name": "Headache", "common_name": "headache"}]
                })))
                .expect(1)
                .mount(&server)
                .await;

            let symptoms = configured(&server).extract("I have a headache").await.unwrap();
            assert_eq!(names(&symptoms), vec!["headache"]);
        }

        #[tokio::test]
        async fn unconfigured_makes_no_request() {
            let extractor = InfermedicaExtractor::new(InfermedicaConfig::new()).unwrap();
            assert_eq!(
                extractor.extract("fever").await,
                Err(ExtractionError::Unconfigured)
            );
            assert!(!extractor.extractor_info().configured);
        }
    }

    mod responses {
        use super::*;

        #[tokio::test]
        async fn keeps_symptoms_in_response_order() {
            let result = respond_with(json!({
                "mentions": [
                    {"type": "symptom", "name": "Headache", "common_name": "headache"},
                    {"type": "risk_factor", "name": "Smoking"},
                    {"type": "symptom", "name": "Fever", "common_name": "fever"}
                ]
            }))
            .await
            .unwrap();
            assert_eq!(names(&result), vec!["headache", "fever"]);
        }

        #[tokio::test]
        async fn falls_back_to_raw_name_and_drops_nameless() {
            let result = respond_with(json!({
                "mentions": [
                    {"type": "symptom", "name": "Pyrexia"},
                    {"type": "symptom", "name": "Cough", "common_name": ""},
                    {"type": "symptom"}
                ]
            }))
            .await
            .unwrap();
            assert_eq!(names(&result), vec!["Pyrexia", "Cough"]);
        }

        #[tokio::test]
        async fn empty_mentions_are_no_mentions() {
            assert_eq!(
                respond_with(json!({"mentions": []})).await,
                Err(ExtractionError::NoSymptomsFound(NoSymptoms::NoMentions))
            );
            assert_eq!(
                respond_with(json!({"obvious": true})).await,
                Err(ExtractionError::NoSymptomsFound(NoSymptoms::NoMentions))
            );
        }

        #[tokio::test]
        async fn non_symptom_mentions_are_distinguished() {
            assert_eq!(
                respond_with(json!({
                    "mentions": [{"type": "risk_factor", "name": "Smoking"}]
                }))
                .await,
                Err(ExtractionError::NoSymptomsFound(NoSymptoms::NoSymptomMentions))
            );
        }
    }

    mod failures {
        use super::*;

        async fn with_status(status: u16) -> Result<Vec<Symptom>, ExtractionError> {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
            configured(&server).extract("fever").await
        }

        #[tokio::test]
        async fn forbidden_is_auth_failure() {
            assert_eq!(with_status(403).await, Err(ExtractionError::AuthFailed));
        }

        #[tokio::test]
        async fn other_statuses_are_upstream_errors() {
            assert_eq!(with_status(500).await, Err(ExtractionError::upstream(500)));
            assert_eq!(with_status(401).await, Err(ExtractionError::upstream(401)));
            assert_eq!(with_status(204).await, Err(ExtractionError::upstream(204)));
        }

        #[tokio::test]
        async fn timeout_is_unreachable() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"mentions": []}))
                        .set_delay(Duration::from_secs(2)),
                )
                .mount(&server)
                .await;

            let result = configured(&server).extract("fever").await;
            assert!(matches!(result, Err(ExtractionError::Unreachable { .. })));
        }

        #[tokio::test]
        async fn refused_connection_is_unreachable() {
            let config = InfermedicaConfig::new()
                .with_base_url("http://127.0.0.1:9")
                .with_credentials("id", "key")
                .with_timeout(Duration::from_millis(500));
            let extractor = InfermedicaExtractor::new(config).unwrap();
            let result = extractor.extract("fever").await;
            assert!(matches!(result, Err(ExtractionError::Unreachable { .. })));
        }

        #[tokio::test]
        async fn malformed_body_is_unreachable() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
                .mount(&server)
                .await;
            let result = configured(&server).extract("fever").await;
            assert!(matches!(result, Err(ExtractionError::Unreachable { .. })));
        }
    }
}
