//! Application handlers.
//!
//! Handlers that orchestrate domain operations for each webhook turn.

pub mod dialogue;

pub use dialogue::DialogueController;
