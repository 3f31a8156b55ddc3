//! Error types for the domain layer.

use thiserror::Error;

/// Errors constructing value objects or moving a status along.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        ValidationError::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::empty_field("account_id");
        assert_eq!(err.to_string(), "Field 'account_id' cannot be empty");
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let err = ValidationError::invalid_transition("done", "uploading");
        assert_eq!(err.to_string(), "Cannot move from done to uploading");
    }
}
