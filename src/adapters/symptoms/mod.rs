//! Symptom extractor adapters.
//!
//! - `InfermedicaExtractor` - calls the Infermedica `/parse` endpoint
//! - `MockSymptomExtractor` - scripted outcomes for tests

mod infermedica_extractor;
mod mock_extractor;

pub use infermedica_extractor::{InfermedicaConfig, InfermedicaExtractor};
pub use mock_extractor::{MockOutcome, MockSymptomExtractor};
