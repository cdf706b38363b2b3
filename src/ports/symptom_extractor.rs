//! Symptom Extractor Port - Interface for the external symptom classifier.
//!
//! This port abstracts the call to a third-party NLP service that reads a
//! free-text utterance and returns the medical symptoms it mentions. The
//! dialogue controller depends only on this trait, so tests can substitute a
//! mock and never touch the network.
//!
//! # Failure model
//!
//! Every failure is an [`ExtractionError`] variant. Each one maps to its own
//! caller-facing sentence, so implementations must pick the most specific
//! variant rather than folding failures together.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::triage::Symptom;

/// Port for symptom extraction.
#[async_trait]
pub trait SymptomExtractor: Send + Sync {
    /// Extracts symptoms from an utterance.
    ///
    /// The utterance may be empty or arbitrary text; no local length limit is
    /// applied. On success the list is non-empty and in classifier order.
    async fn extract(&self, utterance: &str) -> Result<Vec<Symptom>, ExtractionError>;

    /// Get extractor information (name, endpoint).
    fn extractor_info(&self) -> ExtractorInfo;
}

/// Describes an extractor implementation for logs and health output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorInfo {
    /// Short provider name (e.g. "infermedica").
    pub name: String,
    /// Endpoint the extractor calls, if any.
    pub endpoint: Option<String>,
    /// Whether the extractor has everything it needs to make a call.
    pub configured: bool,
}

impl ExtractorInfo {
    /// Creates extractor info.
    pub fn new(name: impl Into<String>, endpoint: Option<String>, configured: bool) -> Self {
        Self {
            name: name.into(),
            endpoint,
            configured,
        }
    }
}

/// Why a successful classifier response still yielded no symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSymptoms {
    /// The classifier found no mentions at all.
    NoMentions,
    /// Mentions were found, but none of them were symptoms.
    NoSymptomMentions,
}

/// Errors from the symptom extraction path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Endpoint, API key, or application id is missing.
    #[error("symptom extraction is not configured")]
    Unconfigured,

    /// The classifier rejected our credentials (HTTP 403).
    #[error("authentication with the symptom classifier failed")]
    AuthFailed,

    /// The classifier answered with an unexpected status.
    #[error("symptom classifier returned HTTP {status}")]
    UpstreamError {
        /// HTTP status code returned.
        status: u16,
    },

    /// Network failure, timeout, or unreadable response.
    #[error("symptom classifier unreachable: {reason}")]
    Unreachable {
        /// Transport-level detail, for logs only.
        reason: String,
    },

    /// The classifier answered but found no symptoms.
    #[error("no symptoms found ({0:?})")]
    NoSymptomsFound(NoSymptoms),
}

impl ExtractionError {
    /// Creates an upstream error for a status code.
    pub fn upstream(status: u16) -> Self {
        Self::UpstreamError { status }
    }

    /// Creates an unreachable error.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    /// Returns true for failures of the transport or service rather than of
    /// the caller's description.
    pub fn is_service_failure(&self) -> bool {
        !matches!(self, Self::NoSymptomsFound(_))
    }

    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unconfigured => "UNCONFIGURED",
            Self::AuthFailed => "AUTH_FAILED",
            Self::UpstreamError { .. } => "UPSTREAM_ERROR",
            Self::Unreachable { .. } => "UNREACHABLE",
            Self::NoSymptomsFound(NoSymptoms::NoMentions) => "NO_MENTIONS",
            Self::NoSymptomsFound(NoSymptoms::NoSymptomMentions) => "NO_SYMPTOM_MENTIONS",
        }
    }
}
