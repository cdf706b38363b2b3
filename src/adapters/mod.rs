//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum webhook endpoints
//! - `symptoms` - symptom classifier clients
//! - `twiml` - TwiML rendering of dialogue responses

pub mod http;
pub mod symptoms;
pub mod twiml;

pub use http::{voice_router, VoiceAppState};
pub use symptoms::{InfermedicaConfig, InfermedicaExtractor, MockSymptomExtractor};
pub use twiml::TwimlRenderer;
