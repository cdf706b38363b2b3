//! Triage module - symptom vocabulary, advisories, and reply composition.
//!
//! - `Symptom` - canonicalized symptom term
//! - `AdvisoryTable` / `explain` - curated caution sentence lookup
//! - `ResponseComposer` - ordered spoken blocks for one extraction outcome

mod advisory;
mod composer;
mod symptom;

pub use advisory::{explain, AdvisoryTable};
pub use composer::{error_message, ResponseComposer};
pub use symptom::Symptom;
