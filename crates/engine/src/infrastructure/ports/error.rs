//! Error types for port operations.

use chorewars_domain::DomainError;

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// The aggregate refused a mutation inside an atomic update.
    #[error("Update rejected: {0}")]
    Rejected(DomainError),

    /// Uniqueness or exclusivity constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Wrap a domain refusal raised inside an atomic update.
    pub fn rejected(error: DomainError) -> Self {
        Self::Rejected(error)
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a ConstraintViolation error.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_context() {
        let err = RepoError::not_found("Quest", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Quest not found: abc");
    }

    #[test]
    fn constraint_is_detected() {
        let err = RepoError::constraint("quest already claimed");
        assert!(err.is_constraint_violation());
        assert!(!err.is_not_found());
    }
}
