//! Failure taxonomy shared by every use case.

/// Coarse classification of a use-case failure.
///
/// The command API maps each kind onto a wire-level error code; use cases
/// only need to say which bucket their failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced entity does not exist.
    NotFound,
    /// Operation is illegal for the entity's current status.
    InvalidState,
    /// Actor lacks the required party or ownership relationship.
    Forbidden,
    /// Exclusivity violated.
    Conflict,
    /// Input failed validation.
    ValidationFailure,
    /// Storage or serialization failure.
    Internal,
}

/// Errors that know which [`ErrorKind`] they belong to.
pub trait UseCaseError: std::error::Error {
    fn kind(&self) -> ErrorKind;
}
