//! Cross-cutting error types for Disco.
//!
//! Domain-specific errors (`DatabaseError`, `ClientError`, `McpError`) are
//! defined in their respective crates and wrap `CoreError` where a business
//! rule is involved.

use thiserror::Error;

use crate::EntityId;
use crate::enums::{EntityType, ExperimentStatus};

/// Errors that can be raised by any Disco crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: EntityId },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: EntityType,
        id: EntityId,
        from: ExperimentStatus,
        to: ExperimentStatus,
    },

    /// A required field is missing or empty.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub const fn not_found(entity_type: EntityType, id: EntityId) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Reject a blank required text field. Returns the trimmed value.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` when `value` is empty or
/// whitespace only.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::not_found(EntityType::Research, 42);
        assert_eq!(err.to_string(), "Entity not found: research 42");
    }

    #[test]
    fn invalid_transition_message_uses_wire_labels() {
        let err = CoreError::InvalidTransition {
            entity_type: EntityType::Experiment,
            id: 7,
            from: ExperimentStatus::NotStarted,
            to: ExperimentStatus::Finished,
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition: experiment 7 from NOT STARTED to FINISHED"
        );
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("brief", "  checkout  ").unwrap(), "checkout");
    }

    #[test]
    fn require_text_rejects_blank() {
        let err = require_text("content", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: content must not be empty");
    }
}
