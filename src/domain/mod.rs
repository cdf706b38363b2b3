//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine trait)
//! - `triage` - Symptoms, advisories, and reply composition
//! - `dialogue` - Call turns, the dialogue state machine, and the voice script

pub mod dialogue;
pub mod foundation;
pub mod triage;
