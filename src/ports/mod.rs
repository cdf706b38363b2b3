//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SymptomExtractor` - Port for the external symptom classifier

mod symptom_extractor;

pub use symptom_extractor::{ExtractionError, ExtractorInfo, NoSymptoms, SymptomExtractor};
