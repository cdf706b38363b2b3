//! Dialogue state machine.
//!
//! Every webhook request re-enters the machine from scratch: the state is
//! derived from which endpoint was hit and what the request carried, never
//! from server-side memory. The transition table below is the whole of the
//! call flow.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Where a call is in the interaction.
///
/// - `Greeting`: welcome announcement, entered on call start and after any
///   recognition failure or fault
/// - `AwaitingSpeech`: the provider is listening for the caller
/// - `Responding`: a transcript arrived and a reply is being built
/// - `Ended`: the provider hung up after the farewell; no webhook follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Greeting,
    AwaitingSpeech,
    Responding,
    Ended,
}

/// Inputs that drive the dialogue state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueEvent {
    /// The provider delivered the initial call event (or replayed it).
    CallConnected,
    /// A turn arrived with a non-empty transcript.
    SpeechCollected,
    /// A turn arrived without a transcript.
    NoSpeech,
    /// The reply for the current transcript has been built.
    ReplyComposed,
    /// Something unanticipated failed while handling the turn.
    Fault,
    /// The caller stayed silent after the farewell prompt.
    CallerSilent,
}

impl DialogueEvent {
    /// Returns true for inputs that signal something went wrong.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NoSpeech | Self::Fault)
    }

    /// All events, for exhaustive table checks.
    pub const ALL: [DialogueEvent; 6] = [
        DialogueEvent::CallConnected,
        DialogueEvent::SpeechCollected,
        DialogueEvent::NoSpeech,
        DialogueEvent::ReplyComposed,
        DialogueEvent::Fault,
        DialogueEvent::CallerSilent,
    ];
}

impl DialogueState {
    /// All states, for exhaustive table checks.
    pub const ALL: [DialogueState; 4] = [
        DialogueState::Greeting,
        DialogueState::AwaitingSpeech,
        DialogueState::Responding,
        DialogueState::Ended,
    ];

    /// The transition table. `None` means the event is not expected here.
    pub fn successor(&self, event: DialogueEvent) -> Option<DialogueState> {
        use DialogueEvent as E;
        use DialogueState::*;
        match (self, event) {
            (Greeting, E::CallConnected) => Some(AwaitingSpeech),
            (Greeting, E::Fault) => Some(Greeting),
            (AwaitingSpeech, E::SpeechCollected) => Some(Responding),
            (AwaitingSpeech, E::NoSpeech) => Some(Greeting),
            (AwaitingSpeech, E::Fault) => Some(Greeting),
            (AwaitingSpeech, E::CallerSilent) => Some(Ended),
            (Responding, E::ReplyComposed) => Some(AwaitingSpeech),
            (Responding, E::Fault) => Some(Greeting),
            _ => None,
        }
    }

    /// Applies an event, returning the next state.
    pub fn on(&self, event: DialogueEvent) -> Result<DialogueState, ValidationError> {
        match self.successor(event) {
            Some(target) => self.transition_to(target),
            None => Err(ValidationError::invalid_format(
                "dialogue_event",
                format!("{:?} is not expected in {:?}", event, self),
            )),
        }
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        DialogueEvent::ALL
            .iter()
            .any(|event| self.successor(*event) == Some(*target))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        let mut targets = Vec::new();
        for event in DialogueEvent::ALL {
            if let Some(target) = self.successor(event) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod table {
        use super::*;

        #[test]
        fn call_start_moves_greeting_to_listening() {
            assert_eq!(
                DialogueState::Greeting.on(DialogueEvent::CallConnected),
                Ok(DialogueState::AwaitingSpeech)
            );
        }

        #[test]
        fn transcript_moves_listening_to_responding() {
            assert_eq!(
                DialogueState::AwaitingSpeech.on(DialogueEvent::SpeechCollected),
                Ok(DialogueState::Responding)
            );
        }

        #[test]
        fn missing_transcript_restarts_at_greeting() {
            assert_eq!(
                DialogueState::AwaitingSpeech.on(DialogueEvent::NoSpeech),
                Ok(DialogueState::Greeting)
            );
        }

        #[test]
        fn composed_reply_returns_to_listening() {
            assert_eq!(
                DialogueState::Responding.on(DialogueEvent::ReplyComposed),
                Ok(DialogueState::AwaitingSpeech)
            );
        }

        #[test]
        fn fault_while_responding_falls_back_to_greeting() {
            assert_eq!(
                DialogueState::Responding.on(DialogueEvent::Fault),
                Ok(DialogueState::Greeting)
            );
        }

        #[test]
        fn silence_after_farewell_ends_the_call() {
            assert_eq!(
                DialogueState::AwaitingSpeech.on(DialogueEvent::CallerSilent),
                Ok(DialogueState::Ended)
            );
        }

        #[test]
        fn unexpected_event_is_rejected() {
            assert!(DialogueState::Greeting
                .on(DialogueEvent::SpeechCollected)
                .is_err());
            assert!(DialogueState::Responding
                .on(DialogueEvent::CallConnected)
                .is_err());
        }

        #[test]
        fn ended_accepts_nothing() {
            for event in DialogueEvent::ALL {
                assert!(DialogueState::Ended.on(event).is_err());
            }
        }
    }

    mod never_dead_ends {
        use super::*;

        #[test]
        fn every_live_state_has_success_and_failure_exits() {
            for state in DialogueState::ALL {
                if state == DialogueState::Ended {
                    continue;
                }
                let success = DialogueEvent::ALL
                    .iter()
                    .any(|e| !e.is_failure() && state.successor(*e).is_some());
                let failure = DialogueEvent::ALL
                    .iter()
                    .any(|e| e.is_failure() && state.successor(*e).is_some());
                assert!(success, "{:?} has no success exit", state);
                assert!(failure, "{:?} has no failure exit", state);
            }
        }

        #[test]
        fn failures_always_lead_back_to_greeting() {
            for state in DialogueState::ALL {
                for event in DialogueEvent::ALL.iter().filter(|e| e.is_failure()) {
                    if let Some(target) = state.successor(*event) {
                        assert_eq!(target, DialogueState::Greeting);
                    }
                }
            }
        }

        #[test]
        fn only_ended_is_terminal() {
            assert!(DialogueState::Ended.is_terminal());
            assert!(!DialogueState::Greeting.is_terminal());
            assert!(!DialogueState::AwaitingSpeech.is_terminal());
            assert!(!DialogueState::Responding.is_terminal());
        }

        #[test]
        fn can_transition_to_agrees_with_valid_transitions() {
            for state in DialogueState::ALL {
                for target in DialogueState::ALL {
                    assert_eq!(
                        state.can_transition_to(&target),
                        state.valid_transitions().contains(&target),
                        "{:?} -> {:?}",
                        state,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&DialogueState::AwaitingSpeech).unwrap();
        assert_eq!(json, "\"awaiting_speech\"");
    }
}
