//! Unclaim quest use case.

use std::sync::Arc;

use chorewars_domain::{AdventurerId, CompletionStatus, QuestCompletionId};

use crate::infrastructure::ports::{AdventurerRepo, QuestCompletionRepo, QuestRepo};

use super::error::QuestError;
use super::helpers::{lost_race, summarize};
use super::types::CompletionSummary;

/// Give a claimed quest back to the board. The completion record is deleted.
pub struct UnclaimQuest {
    completion_repo: Arc<dyn QuestCompletionRepo>,
    quest_repo: Arc<dyn QuestRepo>,
    adventurer_repo: Arc<dyn AdventurerRepo>,
}

impl UnclaimQuest {
    pub fn new(
        completion_repo: Arc<dyn QuestCompletionRepo>,
        quest_repo: Arc<dyn QuestRepo>,
        adventurer_repo: Arc<dyn AdventurerRepo>,
    ) -> Self {
        Self {
            completion_repo,
            quest_repo,
            adventurer_repo,
        }
    }

    pub async fn execute(
        &self,
        completion_id: QuestCompletionId,
        adventurer_id: AdventurerId,
    ) -> Result<CompletionSummary, QuestError> {
        let completion = self
            .completion_repo
            .get(completion_id)
            .await?
            .ok_or(QuestError::CompletionNotFound(completion_id))?;

        if !completion.is_owned_by(adventurer_id) {
            return Err(QuestError::NotOwner(adventurer_id));
        }

        completion
            .ensure_unclaimable()
            .map_err(|_| QuestError::NotClaimed(completion_id))?;
        self.completion_repo
            .delete(completion_id, CompletionStatus::Claimed)
            .await
            .map_err(|e| lost_race(e, completion_id, QuestError::NotClaimed(completion_id)))?;

        tracing::info!(
            completion_id = %completion_id,
            quest_id = %completion.quest_id(),
            adventurer_id = %adventurer_id,
            "Quest unclaimed"
        );

        Ok(summarize(
            self.quest_repo.as_ref(),
            self.adventurer_repo.as_ref(),
            completion,
            true,
        )
        .await)
    }
}
