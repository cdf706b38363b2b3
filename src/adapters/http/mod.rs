//! HTTP adapters - webhook endpoint implementations.

pub mod voice;

pub use voice::{voice_router, VoiceAppState};
