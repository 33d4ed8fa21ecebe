//! Shared helpers for quest lifecycle use cases.

use chorewars_domain::{QuestCompletion, QuestCompletionId};

use crate::infrastructure::ports::{AdventurerRepo, QuestRepo, RepoError};

use super::error::QuestError;
use super::types::CompletionSummary;

/// Map a failed conditional write on a completion.
///
/// The record vanished or left the status the caller read; `moved` is the
/// error reported in the second case.
pub(super) fn lost_race(
    error: RepoError,
    completion_id: QuestCompletionId,
    moved: QuestError,
) -> QuestError {
    if error.is_not_found() {
        QuestError::CompletionNotFound(completion_id)
    } else if error.is_constraint_violation() {
        moved
    } else {
        QuestError::Repo(error)
    }
}

/// Attach quest title and username to a completion.
///
/// Runs after the state change is stored, so read failures degrade to empty
/// strings instead of failing the operation.
pub(super) async fn summarize(
    quest_repo: &dyn QuestRepo,
    adventurer_repo: &dyn AdventurerRepo,
    completion: QuestCompletion,
    unclaimed: bool,
) -> CompletionSummary {
    let quest_title = match quest_repo.get(completion.quest_id()).await {
        Ok(Some(quest)) => quest.title().to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            tracing::warn!(
                quest_id = %completion.quest_id(),
                error = %e,
                "Failed to read quest for completion summary"
            );
            String::new()
        }
    };

    let username = match adventurer_repo.get(completion.adventurer_id()).await {
        Ok(Some(adventurer)) => adventurer.username().to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            tracing::warn!(
                adventurer_id = %completion.adventurer_id(),
                error = %e,
                "Failed to read adventurer for completion summary"
            );
            String::new()
        }
    };

    CompletionSummary {
        completion,
        quest_title,
        username,
        unclaimed,
    }
}
