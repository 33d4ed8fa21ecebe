//! Verify quest use case.
//!
//! A party leader approves or rejects a pending completion. Approval runs the
//! reward cascade: experience, currency, attributes, level-up, feed entries,
//! loot and milestones, in that order. The verdict is stored before the
//! cascade starts and each later step is applied independently; a failing
//! step is logged, reported and skipped. Nothing is rolled back.

use std::sync::Arc;

use chorewars_domain::{
    detect_milestones, Adventurer, AdventurerId, CompletionStatus, LevelUp, LootDrop, Milestone,
    Quest, QuestCompletion, QuestCompletionId,
};

use crate::infrastructure::ports::{AdventurerRepo, ClockPort, QuestCompletionRepo, QuestRepo};
use crate::use_cases::activity::ActivityFeedRecorder;
use crate::use_cases::loot::LootDropGenerator;
use crate::use_cases::progression::ProgressionOps;

use super::error::QuestError;
use super::helpers::{lost_race, summarize};
use super::types::{CompletionSummary, RewardFailure, RewardStep, VerificationOutcome};

pub struct VerifyQuest {
    completion_repo: Arc<dyn QuestCompletionRepo>,
    quest_repo: Arc<dyn QuestRepo>,
    adventurer_repo: Arc<dyn AdventurerRepo>,
    progression: Arc<ProgressionOps>,
    loot: Arc<LootDropGenerator>,
    activity: Arc<ActivityFeedRecorder>,
    clock: Arc<dyn ClockPort>,
}

impl VerifyQuest {
    pub fn new(
        completion_repo: Arc<dyn QuestCompletionRepo>,
        quest_repo: Arc<dyn QuestRepo>,
        adventurer_repo: Arc<dyn AdventurerRepo>,
        progression: Arc<ProgressionOps>,
        loot: Arc<LootDropGenerator>,
        activity: Arc<ActivityFeedRecorder>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            completion_repo,
            quest_repo,
            adventurer_repo,
            progression,
            loot,
            activity,
            clock,
        }
    }

    pub async fn execute(
        &self,
        completion_id: QuestCompletionId,
        verifier_id: AdventurerId,
        approved: bool,
    ) -> Result<VerificationOutcome, QuestError> {
        let mut completion = self
            .completion_repo
            .get(completion_id)
            .await?
            .ok_or(QuestError::CompletionNotFound(completion_id))?;

        if completion.status() != CompletionStatus::PendingVerification {
            return Err(QuestError::NotPendingVerification(completion_id));
        }

        let quest = self
            .quest_repo
            .get(completion.quest_id())
            .await?
            .ok_or(QuestError::QuestNotFound(completion.quest_id()))?;

        let verifier_in_party = self
            .adventurer_repo
            .get(verifier_id)
            .await?
            .is_some_and(|verifier| verifier.is_member_of(quest.party_id()));
        if !verifier_in_party {
            return Err(QuestError::InvalidVerifier(verifier_id));
        }

        let now = self.clock.now();
        if approved {
            completion.approve(verifier_id, now)?;
        } else {
            completion.reject(verifier_id, now)?;
        }
        self.completion_repo
            .transition(CompletionStatus::PendingVerification, &completion)
            .await
            .map_err(|e| {
                lost_race(
                    e,
                    completion_id,
                    QuestError::NotPendingVerification(completion_id),
                )
            })?;

        tracing::info!(
            completion_id = %completion_id,
            verifier_id = %verifier_id,
            status = %completion.status(),
            "Quest verified"
        );

        if !approved {
            let summary = summarize(
                self.quest_repo.as_ref(),
                self.adventurer_repo.as_ref(),
                completion,
                false,
            )
            .await;
            return Ok(VerificationOutcome::rejected(summary));
        }

        let mut cascade = Cascade::default();
        self.grant_rewards(&quest, &completion, &mut cascade).await;

        let summary = summarize(
            self.quest_repo.as_ref(),
            self.adventurer_repo.as_ref(),
            completion,
            false,
        )
        .await;
        Ok(cascade.into_outcome(summary))
    }

    async fn grant_rewards(
        &self,
        quest: &Quest,
        completion: &QuestCompletion,
        cascade: &mut Cascade,
    ) {
        let adventurer_id = completion.adventurer_id();
        let rewards = completion.rewards();

        let before = cascade.step(
            RewardStep::ReadProgressBefore,
            self.progression.get_progress(adventurer_id).await,
        );

        cascade.step(
            RewardStep::AwardExperience,
            self.progression
                .award_experience(adventurer_id, rewards.experience)
                .await,
        );
        cascade.step(
            RewardStep::AwardCurrency,
            self.progression
                .award_currency(adventurer_id, rewards.currency)
                .await,
        );
        cascade.step(
            RewardStep::AwardAttributes,
            self.progression
                .award_attributes(adventurer_id, rewards.attributes)
                .await,
        );
        cascade.level_up = cascade
            .step(
                RewardStep::ResolveLevelUp,
                self.progression.check_level_up(adventurer_id).await,
            )
            .flatten();

        let after = cascade.step(
            RewardStep::ReadProgressAfter,
            self.progression.get_progress(adventurer_id).await,
        );

        cascade.step(
            RewardStep::RecordQuestCompleted,
            self.activity
                .record_quest_completed(adventurer_id, quest.title(), rewards)
                .await,
        );
        if let Some(level_up) = cascade.level_up {
            cascade.step(
                RewardStep::RecordLevelUp,
                self.activity.record_level_up(adventurer_id, level_up).await,
            );
        }

        cascade.loot = cascade
            .step(
                RewardStep::GenerateLoot,
                self.loot.try_generate(adventurer_id, completion.id()).await,
            )
            .flatten();
        if let Some(loot) = &cascade.loot {
            let recorded = self.activity.record_loot_found(adventurer_id, loot).await;
            cascade.step(RewardStep::RecordLoot, recorded);
        }

        if let (Some(before), Some(after)) = (before, after) {
            self.record_milestones(&before, &after, cascade).await;
        }
    }

    async fn record_milestones(
        &self,
        before: &Adventurer,
        after: &Adventurer,
        cascade: &mut Cascade,
    ) {
        for milestone in detect_milestones(&before.attributes(), &after.attributes()) {
            let recorded = self.activity.record_milestone(after.id(), &milestone).await;
            if cascade.step(RewardStep::RecordMilestone, recorded).is_some() {
                tracing::info!(
                    adventurer_id = %after.id(),
                    attribute = %milestone.attribute,
                    threshold = milestone.threshold,
                    title = %milestone.title,
                    "Milestone reached"
                );
                cascade.milestones.push(milestone);
            }
        }
    }
}

/// Accumulates what the approval cascade produced.
#[derive(Default)]
struct Cascade {
    level_up: Option<LevelUp>,
    loot: Option<LootDrop>,
    milestones: Vec<Milestone>,
    failures: Vec<RewardFailure>,
}

impl Cascade {
    /// Keep the value of a successful step; log and record a failed one.
    fn step<T, E>(&mut self, step: RewardStep, result: Result<T, E>) -> Option<T>
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(step = %step, error = %e, "Reward step failed");
                self.failures.push(RewardFailure {
                    step,
                    message: e.to_string(),
                });
                None
            }
        }
    }

    fn into_outcome(self, summary: CompletionSummary) -> VerificationOutcome {
        VerificationOutcome {
            summary,
            level_up: self.level_up,
            loot: self.loot,
            milestones: self.milestones,
            failures: self.failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequenceRandom};
    use crate::infrastructure::ports::{
        AdventurerChange, MockActivityFeedRepo, MockAdventurerRepo, MockLootDropRepo,
        MockQuestCompletionRepo, MockQuestRepo, RepoError,
    };
    use crate::use_cases::error::{ErrorKind, UseCaseError};
    use chorewars_domain::{
        AttributeScores, DisplayName, PartyId, QuestTitle, RewardSnapshot, Username,
    };
    use chrono::Utc;

    /// Run a mutation against a copy of `stored`, the way the store would.
    fn apply(
        stored: &Adventurer,
        mutate: crate::infrastructure::ports::AdventurerMutation,
    ) -> Result<Option<AdventurerChange>, RepoError> {
        let before = stored.clone();
        let mut after = before.clone();
        mutate(&mut after).map_err(RepoError::rejected)?;
        Ok(Some(AdventurerChange { before, after }))
    }

    struct Scenario {
        quest: Quest,
        owner: Adventurer,
        leader: Adventurer,
    }

    impl Scenario {
        fn new() -> Self {
            let party_id = PartyId::new();
            let leader = Adventurer::new(
                party_id,
                Username::new("dm").unwrap(),
                DisplayName::new("Dungeon Master").unwrap(),
                Utc::now(),
            );
            let owner = Adventurer::new(
                party_id,
                Username::new("ulla").unwrap(),
                DisplayName::new("Ulla").unwrap(),
                Utc::now(),
            );
            let quest = Quest::new(
                party_id,
                QuestTitle::new("Clean gutters").unwrap(),
                RewardSnapshot::new(50, 25, AttributeScores::new(2, 0, 0)),
                leader.id(),
                Utc::now(),
            )
            .unwrap();
            Self {
                quest,
                owner,
                leader,
            }
        }

        fn completion(&self, status: CompletionStatus) -> QuestCompletion {
            let mut completion = QuestCompletion::claim(&self.quest, self.owner.id(), Utc::now());
            if status == CompletionStatus::Claimed {
                return completion;
            }
            completion.complete(Utc::now()).unwrap();
            match status {
                CompletionStatus::Approved => {
                    completion.approve(self.leader.id(), Utc::now()).unwrap()
                }
                CompletionStatus::Rejected => {
                    completion.reject(self.leader.id(), Utc::now()).unwrap()
                }
                _ => {}
            }
            completion
        }

        fn adventurer_repo(&self, updates: usize) -> MockAdventurerRepo {
            let leader = self.leader.clone();
            let owner = self.owner.clone();
            let mut repo = MockAdventurerRepo::new();
            repo.expect_get().returning(move |id| {
                Ok([&leader, &owner]
                    .into_iter()
                    .find(|a| a.id() == id)
                    .cloned())
            });
            let owner = self.owner.clone();
            repo.expect_update()
                .times(updates)
                .returning(move |_, mutate| apply(&owner, mutate));
            repo
        }

        fn build(
            &self,
            completion: QuestCompletion,
            completion_transitions: usize,
            adventurers: MockAdventurerRepo,
        ) -> VerifyQuest {
            let mut completions = MockQuestCompletionRepo::new();
            completions
                .expect_get()
                .returning(move |_| Ok(Some(completion.clone())));
            completions
                .expect_transition()
                .withf(|expected, _| *expected == CompletionStatus::PendingVerification)
                .times(completion_transitions)
                .returning(|_, _| Ok(()));
            self.build_with(completions, adventurers)
        }

        fn build_with(
            &self,
            completions: MockQuestCompletionRepo,
            adventurers: MockAdventurerRepo,
        ) -> VerifyQuest {
            // The loot generator reads the completion after the verdict.
            let approved = self.completion(CompletionStatus::Approved);
            let mut approved_reads = MockQuestCompletionRepo::new();
            approved_reads
                .expect_get()
                .returning(move |_| Ok(Some(approved.clone())));

            let quest = self.quest.clone();
            let mut quests = MockQuestRepo::new();
            quests
                .expect_get()
                .returning(move |_| Ok(Some(quest.clone())));

            let mut loot_repo = MockLootDropRepo::new();
            loot_repo.expect_find_for_completion().returning(|_| Ok(None));
            loot_repo.expect_add().never();
            let mut feed = MockActivityFeedRepo::new();
            feed.expect_append().returning(|_| Ok(()));

            let adventurers: Arc<dyn AdventurerRepo> = Arc::new(adventurers);
            let clock = Arc::new(FixedClock(Utc::now()));
            VerifyQuest::new(
                Arc::new(completions),
                Arc::new(quests),
                adventurers.clone(),
                Arc::new(ProgressionOps::new(adventurers.clone())),
                Arc::new(LootDropGenerator::new(
                    Arc::new(loot_repo),
                    Arc::new(approved_reads),
                    Arc::new(SequenceRandom::no_loot()),
                    clock.clone(),
                )),
                Arc::new(ActivityFeedRecorder::new(
                    adventurers,
                    Arc::new(feed),
                    clock.clone(),
                )),
                clock,
            )
        }
    }

    #[tokio::test]
    async fn rejection_never_awards_rewards() {
        let scenario = Scenario::new();
        let completion = scenario.completion(CompletionStatus::PendingVerification);
        let completion_id = completion.id();
        let use_case = scenario.build(completion, 1, scenario.adventurer_repo(0));

        let outcome = use_case
            .execute(completion_id, scenario.leader.id(), false)
            .await
            .unwrap();

        assert_eq!(
            outcome.summary.completion.status(),
            CompletionStatus::Rejected
        );
        assert_eq!(
            outcome.summary.completion.verified_by(),
            Some(scenario.leader.id())
        );
        assert!(outcome.level_up.is_none());
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn non_pending_completion_is_invalid_state_for_either_verdict() {
        let scenario = Scenario::new();
        for status in [
            CompletionStatus::Claimed,
            CompletionStatus::Approved,
            CompletionStatus::Rejected,
        ] {
            for approved in [true, false] {
                let completion = scenario.completion(status);
                let completion_id = completion.id();
                let use_case = scenario.build(completion, 0, scenario.adventurer_repo(0));

                let err = use_case
                    .execute(completion_id, scenario.leader.id(), approved)
                    .await
                    .unwrap_err();

                assert_eq!(err.kind(), ErrorKind::InvalidState);
            }
        }
    }

    #[tokio::test]
    async fn verifier_outside_party_is_forbidden() {
        let scenario = Scenario::new();
        let completion = scenario.completion(CompletionStatus::PendingVerification);
        let completion_id = completion.id();
        let use_case = scenario.build(completion, 0, scenario.adventurer_repo(0));

        let err = use_case
            .execute(completion_id, AdventurerId::new(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, QuestError::InvalidVerifier(_)));
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn approval_applies_each_award_and_records_completion() {
        let scenario = Scenario::new();
        let completion = scenario.completion(CompletionStatus::PendingVerification);
        let completion_id = completion.id();
        // experience, currency, attributes and the level-up check.
        let use_case = scenario.build(completion, 1, scenario.adventurer_repo(4));

        let outcome = use_case
            .execute(completion_id, scenario.leader.id(), true)
            .await
            .unwrap();

        assert!(outcome.is_approved());
        assert!(outcome.level_up.is_none());
        assert!(outcome.loot.is_none());
        assert!(outcome.milestones.is_empty());
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.summary.username, "ulla");
    }

    #[tokio::test]
    async fn failed_award_is_reported_without_undoing_the_verdict() {
        let scenario = Scenario::new();
        let completion = scenario.completion(CompletionStatus::PendingVerification);
        let completion_id = completion.id();

        let leader = scenario.leader.clone();
        let owner = scenario.owner.clone();
        let mut adventurers = MockAdventurerRepo::new();
        adventurers.expect_get().returning(move |id| {
            Ok([&leader, &owner]
                .into_iter()
                .find(|a| a.id() == id)
                .cloned())
        });
        let stored = scenario.owner.clone();
        adventurers.expect_update().returning(move |_, mutate| {
            let change = apply(&stored, mutate)?;
            match change {
                Some(c) if c.after.currency() != c.before.currency() => Err(
                    RepoError::database("update_adventurer", "write conflict"),
                ),
                other => Ok(other),
            }
        });
        let use_case = scenario.build(completion, 1, adventurers);

        let outcome = use_case
            .execute(completion_id, scenario.leader.id(), true)
            .await
            .unwrap();

        assert!(outcome.is_approved());
        let failed: Vec<RewardStep> = outcome.failures.iter().map(|f| f.step).collect();
        assert_eq!(failed, vec![RewardStep::AwardCurrency]);
    }

    #[tokio::test]
    async fn losing_a_concurrent_verdict_is_invalid_state_and_awards_nothing() {
        let scenario = Scenario::new();
        let completion = scenario.completion(CompletionStatus::PendingVerification);
        let completion_id = completion.id();
        let mut completions = MockQuestCompletionRepo::new();
        completions
            .expect_get()
            .returning(move |_| Ok(Some(completion.clone())));
        completions.expect_transition().times(1).returning(|_, c| {
            Err(RepoError::constraint(format!(
                "completion {} is approved, expected pending_verification",
                c.id()
            )))
        });
        let use_case = scenario.build_with(completions, scenario.adventurer_repo(0));

        let err = use_case
            .execute(completion_id, scenario.leader.id(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, QuestError::NotPendingVerification(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn progress_read_failures_name_which_read_failed() {
        for (failing_read, expected) in [
            (0, RewardStep::ReadProgressBefore),
            (1, RewardStep::ReadProgressAfter),
        ] {
            let scenario = Scenario::new();
            let completion = scenario.completion(CompletionStatus::PendingVerification);
            let completion_id = completion.id();

            let leader = scenario.leader.clone();
            let owner = scenario.owner.clone();
            let owner_reads = AtomicUsize::new(0);
            let mut adventurers = MockAdventurerRepo::new();
            adventurers.expect_get().returning(move |id| {
                if id == leader.id() {
                    return Ok(Some(leader.clone()));
                }
                if owner_reads.fetch_add(1, Ordering::SeqCst) == failing_read {
                    return Err(RepoError::database("get_adventurer", "timeout"));
                }
                Ok(Some(owner.clone()))
            });
            let stored = scenario.owner.clone();
            adventurers
                .expect_update()
                .returning(move |_, mutate| apply(&stored, mutate));
            let use_case = scenario.build(completion, 1, adventurers);

            let outcome = use_case
                .execute(completion_id, scenario.leader.id(), true)
                .await
                .unwrap();

            let failed: Vec<RewardStep> = outcome.failures.iter().map(|f| f.step).collect();
            assert_eq!(failed, vec![expected]);
            assert!(outcome.failures[0].to_string().starts_with(&expected.to_string()));
        }
    }
}
