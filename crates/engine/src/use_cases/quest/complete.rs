//! Complete quest use case.

use std::sync::Arc;

use chorewars_domain::{AdventurerId, CompletionStatus, QuestCompletionId};

use crate::infrastructure::ports::{AdventurerRepo, ClockPort, QuestCompletionRepo, QuestRepo};

use super::error::QuestError;
use super::helpers::{lost_race, summarize};
use super::types::CompletionSummary;

/// Mark a claimed quest as done and hand it to the party leader.
pub struct CompleteQuest {
    completion_repo: Arc<dyn QuestCompletionRepo>,
    quest_repo: Arc<dyn QuestRepo>,
    adventurer_repo: Arc<dyn AdventurerRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CompleteQuest {
    pub fn new(
        completion_repo: Arc<dyn QuestCompletionRepo>,
        quest_repo: Arc<dyn QuestRepo>,
        adventurer_repo: Arc<dyn AdventurerRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            completion_repo,
            quest_repo,
            adventurer_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        completion_id: QuestCompletionId,
        adventurer_id: AdventurerId,
    ) -> Result<CompletionSummary, QuestError> {
        let mut completion = self
            .completion_repo
            .get(completion_id)
            .await?
            .ok_or(QuestError::CompletionNotFound(completion_id))?;

        if !completion.is_owned_by(adventurer_id) {
            return Err(QuestError::NotOwner(adventurer_id));
        }

        completion
            .complete(self.clock.now())
            .map_err(|_| QuestError::NotClaimed(completion_id))?;
        self.completion_repo
            .transition(CompletionStatus::Claimed, &completion)
            .await
            .map_err(|e| lost_race(e, completion_id, QuestError::NotClaimed(completion_id)))?;

        tracing::info!(
            completion_id = %completion_id,
            adventurer_id = %adventurer_id,
            "Quest completed, awaiting verification"
        );

        Ok(summarize(
            self.quest_repo.as_ref(),
            self.adventurer_repo.as_ref(),
            completion,
            false,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        MockAdventurerRepo, MockQuestCompletionRepo, MockQuestRepo, RepoError,
    };
    use crate::use_cases::error::{ErrorKind, UseCaseError};
    use chorewars_domain::{
        AttributeScores, PartyId, Quest, QuestCompletion, QuestTitle, RewardSnapshot,
    };
    use chrono::Utc;

    fn claimed(owner: AdventurerId) -> QuestCompletion {
        let quest = Quest::new(
            PartyId::new(),
            QuestTitle::new("Vacuum").unwrap(),
            RewardSnapshot::new(20, 5, AttributeScores::ZERO),
            AdventurerId::new(),
            Utc::now(),
        )
        .unwrap();
        QuestCompletion::claim(&quest, owner, Utc::now())
    }

    fn use_case(completions: MockQuestCompletionRepo) -> CompleteQuest {
        let mut quests = MockQuestRepo::new();
        quests.expect_get().returning(|_| Ok(None));
        let mut adventurers = MockAdventurerRepo::new();
        adventurers
            .expect_get()
            .returning(|_| Err(RepoError::database("get_adventurer", "offline")));
        CompleteQuest::new(
            Arc::new(completions),
            Arc::new(quests),
            Arc::new(adventurers),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    #[tokio::test]
    async fn when_completion_missing_returns_not_found() {
        let mut completions = MockQuestCompletionRepo::new();
        completions.expect_get().returning(|_| Ok(None));

        let err = use_case(completions)
            .execute(QuestCompletionId::new(), AdventurerId::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Quest completion not found");
    }

    #[tokio::test]
    async fn when_caller_is_not_owner_returns_forbidden() {
        let completion = claimed(AdventurerId::new());
        let mut completions = MockQuestCompletionRepo::new();
        completions
            .expect_get()
            .returning(move |_| Ok(Some(completion.clone())));
        completions.expect_transition().never();

        let err = use_case(completions)
            .execute(QuestCompletionId::new(), AdventurerId::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn when_already_pending_returns_invalid_state() {
        let owner = AdventurerId::new();
        let mut completion = claimed(owner);
        completion.complete(Utc::now()).unwrap();
        let mut completions = MockQuestCompletionRepo::new();
        completions
            .expect_get()
            .returning(move |_| Ok(Some(completion.clone())));
        completions.expect_transition().never();

        let err = use_case(completions)
            .execute(QuestCompletionId::new(), owner)
            .await
            .unwrap_err();

        assert!(matches!(err, QuestError::NotClaimed(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn when_claimed_moves_to_pending_even_if_summary_reads_fail() {
        let owner = AdventurerId::new();
        let completion = claimed(owner);
        let completion_id = completion.id();
        let mut completions = MockQuestCompletionRepo::new();
        completions
            .expect_get()
            .returning(move |_| Ok(Some(completion.clone())));
        completions
            .expect_transition()
            .withf(|expected, c| {
                *expected == CompletionStatus::Claimed
                    && c.status() == CompletionStatus::PendingVerification
                    && c.completed_at().is_some()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let summary = use_case(completions)
            .execute(completion_id, owner)
            .await
            .unwrap();

        assert_eq!(
            summary.completion.status(),
            CompletionStatus::PendingVerification
        );
        assert!(summary.quest_title.is_empty());
        assert!(summary.username.is_empty());
    }

    #[tokio::test]
    async fn losing_a_concurrent_complete_is_invalid_state() {
        let owner = AdventurerId::new();
        let completion = claimed(owner);
        let completion_id = completion.id();
        let mut completions = MockQuestCompletionRepo::new();
        completions
            .expect_get()
            .returning(move |_| Ok(Some(completion.clone())));
        completions.expect_transition().returning(|_, c| {
            Err(RepoError::constraint(format!(
                "completion {} is pending_verification, expected claimed",
                c.id()
            )))
        });

        let err = use_case(completions)
            .execute(completion_id, owner)
            .await
            .unwrap_err();

        assert!(matches!(err, QuestError::NotClaimed(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
