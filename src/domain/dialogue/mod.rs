//! Dialogue module - the voice interaction model.
//!
//! - `CallTurn` - one inbound webhook event
//! - `DialogueState` / `DialogueEvent` - explicit transition table
//! - `DialogueResponse` - ordered spoken segments plus a continuation directive
//! - `script` - the fixed prompts the service speaks

mod errors;
mod response;
pub mod script;
mod state;
mod turn;

pub use errors::DialogueError;
pub use response::{
    DialogueResponse, Directive, Endpoint, Gather, Prosody, SilenceFallback, SpokenSegment,
    VoiceProfile,
};
pub use state::{DialogueEvent, DialogueState};
pub use turn::CallTurn;
