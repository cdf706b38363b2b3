//! Response Composer - turns an extraction outcome into spoken text blocks.
//!
//! Pure: output depends only on the inputs and the advisory table, which
//! makes every caller-facing sentence testable without network access.

use std::sync::Arc;

use crate::ports::{ExtractionError, NoSymptoms};

use super::{AdvisoryTable, Symptom};

const UNCONFIGURED_MESSAGE: &str =
    "Sorry, I'm having trouble connecting to the medical service.";
const AUTH_FAILED_MESSAGE: &str = "Sorry, I'm having trouble authenticating with the service.";
const UPSTREAM_MESSAGE: &str = "Sorry, I'm having trouble getting an answer. Please try again.";
const UNREACHABLE_MESSAGE: &str = "Sorry, I'm having trouble connecting. Please try again later.";
const NO_MENTIONS_MESSAGE: &str =
    "I couldn't find relevant medical information. Please try again.";
const NO_SYMPTOM_MENTIONS_MESSAGE: &str =
    "I couldn't identify specific symptoms. Could you rephrase that?";

const DISCLAIMER: &str = "These symptoms could be related to various conditions. \
                          Please consult a healthcare provider for proper diagnosis.";
const CLOSING_INVITATION: &str = "Would you like more details about any of these symptoms?";

/// Caller-facing sentence for an extraction failure.
///
/// Every error kind has its own wording so failures stay distinguishable in
/// call transcripts and logs.
pub fn error_message(error: &ExtractionError) -> &'static str {
    match error {
        ExtractionError::Unconfigured => UNCONFIGURED_MESSAGE,
        ExtractionError::AuthFailed => AUTH_FAILED_MESSAGE,
        ExtractionError::UpstreamError { .. } => UPSTREAM_MESSAGE,
        ExtractionError::Unreachable { .. } => UNREACHABLE_MESSAGE,
        ExtractionError::NoSymptomsFound(NoSymptoms::NoMentions) => NO_MENTIONS_MESSAGE,
        ExtractionError::NoSymptomsFound(NoSymptoms::NoSymptomMentions) => {
            NO_SYMPTOM_MENTIONS_MESSAGE
        }
    }
}

/// Assembles the ordered blocks of a spoken reply.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    advisories: Arc<AdvisoryTable>,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(AdvisoryTable::standard())
    }
}

impl ResponseComposer {
    /// Creates a composer backed by the given advisory table.
    pub fn new(advisories: Arc<AdvisoryTable>) -> Self {
        Self { advisories }
    }

    /// Composes the reply for one utterance.
    ///
    /// On success the blocks are: the symptom summary with disclaimer, one
    /// advisory per symptom in extraction order, then the closing invitation.
    /// On failure a single apology block specific to the error kind.
    pub fn compose(
        &self,
        utterance: &str,
        extraction: &Result<Vec<Symptom>, ExtractionError>,
    ) -> Vec<String> {
        let symptoms = match extraction {
            Ok(symptoms) if !symptoms.is_empty() => symptoms,
            Ok(_) => {
                // An extractor that reports success with nothing is treated the
                // same as an empty classifier answer.
                return vec![NO_MENTIONS_MESSAGE.to_string()];
            }
            Err(error) => {
                tracing::debug!(
                    code = error.code(),
                    utterance_chars = utterance.chars().count(),
                    "Composing apology for extraction failure"
                );
                return vec![error_message(error).to_string()];
            }
        };

        let names: Vec<&str> = symptoms.iter().map(Symptom::display_name).collect();
        let mut blocks = Vec::with_capacity(symptoms.len() + 2);
        blocks.push(format!(
            "I found these symptoms in your description: {}. {}",
            names.join(", "),
            DISCLAIMER
        ));
        blocks.extend(symptoms.iter().map(|s| self.advisories.explain(s)));
        blocks.push(CLOSING_INVITATION.to_string());

        tracing::debug!(
            symptoms = symptoms.len(),
            blocks = blocks.len(),
            "Composed symptom reply"
        );
        blocks
    }
}
