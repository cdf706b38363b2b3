//! Dialogue handlers.
//!
//! - `DialogueController` - greeting and speech interpretation turns

mod controller;

pub use controller::DialogueController;
