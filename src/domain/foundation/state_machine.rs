//! Transition checking for lifecycle statuses such as
//! [`JobStatus`](crate::domain::publish::JobStatus).

use std::fmt;

use super::ValidationError;

/// A status enum with a fixed set of allowed moves.
///
/// Implementors list their edges once; `transition_to` and `is_terminal`
/// follow from them.
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Display {
    /// Statuses reachable from `self` in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Returns `target` if the move is allowed.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(
                self.to_string(),
                target.to_string(),
            ))
        }
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
