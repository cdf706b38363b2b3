//! Dialogue-level errors recovered by the controller.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

const NO_SPEECH_APOLOGY: &str = "I'm sorry, I didn't catch that. Could you please try again?";
const FAULT_APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request. Please try again.";

/// Failures of a turn that are not extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// The speech webhook arrived without a transcript.
    #[error("speech event carried no transcript")]
    MalformedSpeechEvent,

    /// Anything unanticipated while building the reply.
    #[error("internal fault: {0}")]
    InternalFault(String),
}

impl DialogueError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalFault(message.into())
    }

    /// Sentence spoken to the caller before restarting at the greeting.
    pub fn apology(&self) -> &'static str {
        match self {
            DialogueError::MalformedSpeechEvent => NO_SPEECH_APOLOGY,
            DialogueError::InternalFault(_) => FAULT_APOLOGY,
        }
    }
}

impl From<ValidationError> for DialogueError {
    fn from(err: ValidationError) -> Self {
        DialogueError::InternalFault(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apologies_are_distinct_and_non_empty() {
        let missing = DialogueError::MalformedSpeechEvent.apology();
        let fault = DialogueError::internal("boom").apology();
        assert!(missing.contains("didn't catch that"));
        assert!(!fault.is_empty());
        assert_ne!(missing, fault);
    }

    #[test]
    fn validation_errors_become_internal_faults() {
        let err: DialogueError = ValidationError::empty_field("x").into();
        assert!(matches!(err, DialogueError::InternalFault(_)));
    }
}
