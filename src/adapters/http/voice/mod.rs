//! HTTP adapter for the voice webhooks.
//!
//! - `POST /voice` - call start, answers with the greeting
//! - `POST /handle-input` - speech result, answers with symptom guidance
//! - `GET /health` - liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{HealthResponse, VoiceWebhookForm};
pub use handlers::VoiceAppState;
pub use routes::{voice_router, voice_routes};
