//! CallTurn - one inbound webhook event.

use crate::domain::foundation::{Timestamp, TurnId};

use super::DialogueEvent;

/// A single inbound webhook event.
///
/// Created per HTTP request and dropped once the response is written. The
/// provider call identifier is carried for logging only.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTurn {
    id: TurnId,
    call_sid: Option<String>,
    transcript: Option<String>,
    confidence: Option<f32>,
    received_at: Timestamp,
}

impl CallTurn {
    /// Creates a turn, stamping it with a fresh id and arrival time.
    ///
    /// A transcript that is empty after trimming counts as absent.
    pub fn new(call_sid: Option<String>, transcript: Option<String>) -> Self {
        Self {
            id: TurnId::new(),
            call_sid: call_sid.filter(|sid| !sid.trim().is_empty()),
            transcript: transcript
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            confidence: None,
            received_at: Timestamp::now(),
        }
    }

    /// The initial call event: no transcript.
    pub fn call_started(call_sid: Option<String>) -> Self {
        Self::new(call_sid, None)
    }

    /// Attaches the recognizer's confidence score, if the provider sent one.
    pub fn with_confidence(mut self, confidence: Option<f32>) -> Self {
        self.confidence = confidence.filter(|c| c.is_finite());
        self
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn call_sid(&self) -> Option<&str> {
        self.call_sid.as_deref()
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }

    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }

    /// The event this turn represents on the speech-handling endpoint.
    pub fn speech_event(&self) -> DialogueEvent {
        if self.transcript.is_some() {
            DialogueEvent::SpeechCollected
        } else {
            DialogueEvent::NoSpeech
        }
    }
}
