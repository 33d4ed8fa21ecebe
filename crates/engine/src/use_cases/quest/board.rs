//! Quest board queries.

use std::collections::HashSet;
use std::sync::Arc;

use chorewars_domain::{AdventurerId, CompletionStatus, PartyId, Quest, QuestId};

use crate::infrastructure::ports::{AdventurerRepo, QuestCompletionRepo, QuestRepo};

use super::error::QuestError;
use super::helpers::summarize;
use super::types::CompletionSummary;

pub struct QuestBoard {
    quest_repo: Arc<dyn QuestRepo>,
    completion_repo: Arc<dyn QuestCompletionRepo>,
    adventurer_repo: Arc<dyn AdventurerRepo>,
}

impl QuestBoard {
    pub fn new(
        quest_repo: Arc<dyn QuestRepo>,
        completion_repo: Arc<dyn QuestCompletionRepo>,
        adventurer_repo: Arc<dyn AdventurerRepo>,
    ) -> Self {
        Self {
            quest_repo,
            completion_repo,
            adventurer_repo,
        }
    }

    /// Active party quests nobody currently holds.
    pub async fn available_quests(
        &self,
        adventurer_id: AdventurerId,
        party_id: PartyId,
    ) -> Result<Vec<Quest>, QuestError> {
        let adventurer = self
            .adventurer_repo
            .get(adventurer_id)
            .await?
            .ok_or(QuestError::AdventurerNotFound(adventurer_id))?;
        if !adventurer.is_member_of(party_id) {
            return Err(QuestError::NotInParty(adventurer_id));
        }

        let mut held: HashSet<QuestId> = HashSet::new();
        for status in [
            CompletionStatus::Claimed,
            CompletionStatus::PendingVerification,
        ] {
            held.extend(
                self.completion_repo
                    .list_with_status(status)
                    .await?
                    .iter()
                    .map(|c| c.quest_id()),
            );
        }

        let quests = self.quest_repo.list_active_in_party(party_id).await?;
        Ok(quests
            .into_iter()
            .filter(|q| !held.contains(&q.id()))
            .collect())
    }

    /// Quests the adventurer has claimed or is waiting on verification for.
    pub async fn my_active_quests(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Vec<Quest>, QuestError> {
        let live = self
            .completion_repo
            .list_live_for_adventurer(adventurer_id)
            .await?;

        let mut quests = Vec::with_capacity(live.len());
        for completion in live {
            // A deleted quest simply drops off the list.
            if let Some(quest) = self.quest_repo.get(completion.quest_id()).await? {
                quests.push(quest);
            }
        }
        Ok(quests)
    }

    /// The party leader's inbox: completions awaiting a verdict.
    pub async fn pending_verifications(
        &self,
        party_id: PartyId,
    ) -> Result<Vec<CompletionSummary>, QuestError> {
        let pending = self
            .completion_repo
            .list_with_status(CompletionStatus::PendingVerification)
            .await?;

        let mut summaries = Vec::new();
        for completion in pending {
            let in_party = self
                .quest_repo
                .get(completion.quest_id())
                .await?
                .is_some_and(|q| q.party_id() == party_id);
            if in_party {
                summaries.push(
                    summarize(
                        self.quest_repo.as_ref(),
                        self.adventurer_repo.as_ref(),
                        completion,
                        false,
                    )
                    .await,
                );
            }
        }
        Ok(summaries)
    }
}
