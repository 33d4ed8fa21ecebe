//! Quest lifecycle errors.

use chorewars_domain::{AdventurerId, DomainError, QuestCompletionId, QuestId};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::error::{ErrorKind, UseCaseError};

#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("Quest not found")]
    QuestNotFound(QuestId),
    #[error("Quest completion not found")]
    CompletionNotFound(QuestCompletionId),
    #[error("User not found")]
    AdventurerNotFound(AdventurerId),
    #[error("Quest is not active")]
    QuestInactive(QuestId),
    #[error("Quest is already claimed by another user")]
    AlreadyClaimed(QuestId),
    #[error("User does not belong to this quest's party")]
    NotInParty(AdventurerId),
    #[error("User is not the owner of this quest completion")]
    NotOwner(AdventurerId),
    #[error("Invalid DM for this party")]
    InvalidVerifier(AdventurerId),
    #[error("Quest is not in claimed status")]
    NotClaimed(QuestCompletionId),
    #[error("Quest is not pending verification")]
    NotPendingVerification(QuestCompletionId),
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl UseCaseError for QuestError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::QuestNotFound(_) | Self::CompletionNotFound(_) | Self::AdventurerNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::QuestInactive(_) | Self::NotClaimed(_) | Self::NotPendingVerification(_) => {
                ErrorKind::InvalidState
            }
            Self::AlreadyClaimed(_) => ErrorKind::Conflict,
            Self::NotInParty(_) | Self::NotOwner(_) | Self::InvalidVerifier(_) => {
                ErrorKind::Forbidden
            }
            Self::Domain(DomainError::InvalidStateTransition(_)) => ErrorKind::InvalidState,
            Self::Domain(DomainError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Domain(_) => ErrorKind::ValidationFailure,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(
            QuestError::AlreadyClaimed(QuestId::new()).to_string(),
            "Quest is already claimed by another user"
        );
        assert_eq!(
            QuestError::InvalidVerifier(AdventurerId::new()).to_string(),
            "Invalid DM for this party"
        );
    }

    #[test]
    fn domain_transition_errors_are_invalid_state() {
        let err = QuestError::from(DomainError::invalid_state_transition("nope"));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        let err = QuestError::from(DomainError::validation("bad"));
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn storage_failures_are_internal() {
        let err = QuestError::from(RepoError::database("get_quest", "timeout"));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
