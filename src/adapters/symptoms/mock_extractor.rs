//! Mock Symptom Extractor for testing.
//!
//! Lets dialogue and HTTP tests run without calling the real classifier.
//!
//! # Features
//!
//! - Pre-configured outcomes, consumed in order
//! - Simulated delays for timeout testing
//! - Panic injection for fault-isolation testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let extractor = MockSymptomExtractor::new()
//!     .with_symptoms(["headache", "fever"])
//!     .with_delay(Duration::from_millis(100));
//!
//! let symptoms = extractor.extract("my head hurts").await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::triage::Symptom;
use crate::ports::{ExtractionError, ExtractorInfo, NoSymptoms, SymptomExtractor};

/// Mock symptom extractor for testing.
#[derive(Debug, Clone)]
pub struct MockSymptomExtractor {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Utterances received, for verification.
    calls: Arc<Mutex<Vec<String>>>,
}

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return these symptom names.
    Symptoms(Vec<String>),
    /// Return an error.
    Error(ExtractionError),
    /// Panic inside `extract`.
    Panic(String),
}

impl Default for MockSymptomExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSymptomExtractor {
    /// Creates a mock that answers `NoMentions` once its queue is empty.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful extraction.
    pub fn with_symptoms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.push(MockOutcome::Symptoms(names))
    }

    /// Queues an error.
    pub fn with_error(self, error: ExtractionError) -> Self {
        self.push(MockOutcome::Error(error))
    }

    /// Queues a panic.
    pub fn with_panic(self, message: impl Into<String>) -> Self {
        self.push(MockOutcome::Panic(message.into()))
    }

    /// Sets the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn push(self, outcome: MockOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    /// Number of extract calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Utterances received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockOutcome::Error(ExtractionError::NoSymptomsFound(
                NoSymptoms::NoMentions,
            )))
    }
}

#[async_trait]
impl SymptomExtractor for MockSymptomExtractor {
    async fn extract(&self, utterance: &str) -> Result<Vec<Symptom>, ExtractionError> {
        self.calls.lock().unwrap().push(utterance.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Symptoms(names) => Ok(names
                .into_iter()
                .filter_map(|n| Symptom::new(n).ok())
                .collect()),
            MockOutcome::Error(err) => Err(err),
            MockOutcome::Panic(message) => panic!("{}", message),
        }
    }

    fn extractor_info(&self) -> ExtractorInfo {
        ExtractorInfo::new("mock", None, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_outcomes_in_order() {
        let extractor = MockSymptomExtractor::new()
            .with_symptoms(["headache"])
            .with_error(ExtractionError::AuthFailed);

        let first = extractor.extract("one").await.unwrap();
        assert_eq!(first[0].display_name(), "headache");
        assert_eq!(
            extractor.extract("two").await,
            Err(ExtractionError::AuthFailed)
        );
    }

    #[tokio::test]
    async fn defaults_to_no_mentions_after_exhausted() {
        let extractor = MockSymptomExtractor::new();
        assert_eq!(
            extractor.extract("anything").await,
            Err(ExtractionError::NoSymptomsFound(NoSymptoms::NoMentions))
        );
    }

    #[tokio::test]
    async fn tracks_calls() {
        let extractor = MockSymptomExtractor::new();
        assert_eq!(extractor.call_count(), 0);

        let _ = extractor.extract("I feel dizzy").await;
        let _ = extractor.extract("and tired").await;

        assert_eq!(extractor.calls(), vec!["I feel dizzy", "and tired"]);
    }

    #[tokio::test]
    #[should_panic(expected = "classifier blew up")]
    async fn injected_panic_fires() {
        let extractor = MockSymptomExtractor::new().with_panic("classifier blew up");
        let _ = extractor.extract("fever").await;
    }

    #[tokio::test]
    async fn respects_delay() {
        let extractor = MockSymptomExtractor::new()
            .with_symptoms(["cough"])
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        extractor.extract("cough").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
