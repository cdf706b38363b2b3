//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, identifiers, and error types that the
//! triage and dialogue modules build on.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::TurnId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
