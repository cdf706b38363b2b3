//! State machine trait for enumerated lifecycle states.
//!
//! Gives every state enum the same validated-transition interface, so the
//! transition table can be checked mechanically in tests.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define the transition table; validated transitions and the
/// terminal check come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DialogueState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Greeting, AwaitingSpeech) | ...)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Greeting => vec![AwaitingSpeech],
///             // ...
///         }
///     }
/// }
///
/// let next = DialogueState::Greeting.transition_to(DialogueState::AwaitingSpeech)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(
                format!("{:?}", self),
                format!("{:?}", target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum LineStatus {
        Ringing,
        Connected,
        OnHold,
        Disconnected,
    }

    impl StateMachine for LineStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use LineStatus::*;
            matches!(
                (self, target),
                (Ringing, Connected)
                    | (Ringing, Disconnected)
                    | (Connected, OnHold)
                    | (OnHold, Connected)
                    | (Connected, Disconnected)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use LineStatus::*;
            match self {
                Ringing => vec![Connected, Disconnected],
                Connected => vec![OnHold, Disconnected],
                OnHold => vec![Connected],
                Disconnected => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = LineStatus::Ringing.transition_to(LineStatus::Connected);
        assert_eq!(result, Ok(LineStatus::Connected));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = LineStatus::OnHold.transition_to(LineStatus::Ringing);
        assert_eq!(
            result,
            Err(ValidationError::invalid_transition("OnHold", "Ringing"))
        );
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(LineStatus::Disconnected.is_terminal());
        assert!(!LineStatus::Ringing.is_terminal());
        assert!(!LineStatus::OnHold.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [
            LineStatus::Ringing,
            LineStatus::Connected,
            LineStatus::OnHold,
            LineStatus::Disconnected,
        ] {
            for target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&target),
                    "{:?} -> {:?} listed but rejected",
                    status,
                    target
                );
            }
        }
    }
}
