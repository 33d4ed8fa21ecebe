//! Claim quest use case.

use std::sync::Arc;

use chorewars_domain::{AdventurerId, QuestCompletion, QuestId};

use crate::infrastructure::ports::{AdventurerRepo, ClockPort, QuestCompletionRepo, QuestRepo};

use super::error::QuestError;
use super::types::CompletionSummary;

/// Claim an active quest for an adventurer.
///
/// At most one Claimed or PendingVerification completion may exist per
/// quest. The early lookup gives a cheap failure; the repository insert is
/// what actually enforces it.
pub struct ClaimQuest {
    quest_repo: Arc<dyn QuestRepo>,
    adventurer_repo: Arc<dyn AdventurerRepo>,
    completion_repo: Arc<dyn QuestCompletionRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ClaimQuest {
    pub fn new(
        quest_repo: Arc<dyn QuestRepo>,
        adventurer_repo: Arc<dyn AdventurerRepo>,
        completion_repo: Arc<dyn QuestCompletionRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            quest_repo,
            adventurer_repo,
            completion_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        quest_id: QuestId,
        adventurer_id: AdventurerId,
    ) -> Result<CompletionSummary, QuestError> {
        let quest = self
            .quest_repo
            .get(quest_id)
            .await?
            .ok_or(QuestError::QuestNotFound(quest_id))?;

        if !quest.is_active() {
            return Err(QuestError::QuestInactive(quest_id));
        }

        if self
            .completion_repo
            .find_live_for_quest(quest_id)
            .await?
            .is_some()
        {
            return Err(QuestError::AlreadyClaimed(quest_id));
        }

        let adventurer = self
            .adventurer_repo
            .get(adventurer_id)
            .await?
            .ok_or(QuestError::AdventurerNotFound(adventurer_id))?;

        if !adventurer.is_member_of(quest.party_id()) {
            return Err(QuestError::NotInParty(adventurer_id));
        }

        let completion = QuestCompletion::claim(&quest, adventurer_id, self.clock.now());
        self.completion_repo
            .insert_claim(&completion)
            .await
            .map_err(|e| {
                if e.is_constraint_violation() {
                    QuestError::AlreadyClaimed(quest_id)
                } else {
                    QuestError::Repo(e)
                }
            })?;

        tracing::info!(
            completion_id = %completion.id(),
            quest_id = %quest_id,
            adventurer_id = %adventurer_id,
            "Quest claimed"
        );

        Ok(CompletionSummary {
            completion,
            quest_title: quest.title().to_string(),
            username: adventurer.username().to_string(),
            unclaimed: false,
        })
    }
}
