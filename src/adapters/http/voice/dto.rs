//! HTTP DTOs for the voice webhook endpoints.
//!
//! The telephony provider posts `application/x-www-form-urlencoded` bodies
//! with many fields; only the ones the dialogue needs are read and the rest
//! are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::CallTurn;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Form fields posted by the provider on each webhook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceWebhookForm {
    /// Provider call identifier.
    #[serde(rename = "CallSid", default)]
    pub call_sid: Option<String>,

    /// Recognized speech, present only on gather callbacks.
    #[serde(rename = "SpeechResult", default)]
    pub speech_result: Option<String>,

    /// Recognition confidence in `0.0..=1.0`, sent as text.
    #[serde(rename = "Confidence", default)]
    pub confidence: Option<String>,
}

impl VoiceWebhookForm {
    /// Parses the confidence field, ignoring values that are not numbers.
    pub fn confidence(&self) -> Option<f32> {
        self.confidence
            .as_deref()
            .and_then(|c| c.trim().parse::<f32>().ok())
    }

    /// Turn for a call start; any speech fields are ignored.
    pub fn into_call_start(self) -> CallTurn {
        CallTurn::call_started(self.call_sid)
    }

    /// Turn carrying the recognized speech.
    pub fn into_speech_turn(self) -> CallTurn {
        let confidence = self.confidence();
        CallTurn::new(self.call_sid, self.speech_result).with_confidence(confidence)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl HealthResponse {
    pub fn ok(timestamp: f64) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp,
        }
    }
}
