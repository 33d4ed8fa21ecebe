//! Helpers for constructing the full application stack in tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use chorewars_domain::{
    Adventurer, AdventurerId, AttributeScores, DisplayName, Party, PartyId, PartyName, Quest,
    QuestId, QuestTitle, RewardSnapshot, Username,
};
use chorewars_shared::{
    ActivityFeedItemDto, AdventurerProgressDto, AppResult, ClaimQuestCommand,
    CompleteQuestCommand, GetAdventurerProgressQuery, GetRecentActivityQuery,
    QuestCompletionDto, VerificationReportDto, VerifyQuestCommand,
};

use crate::api::CommandApi;
use crate::app::{App, Repositories};
use crate::infrastructure::clock::{FixedClock, SequenceRandom};
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::ports::{AdventurerRepo, PartyRepo, QuestRepo, RandomPort};

/// The instant every e2e test runs at.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
}

/// A fully wired engine plus one seeded party.
pub struct E2EContext {
    pub api: Arc<CommandApi>,
    pub store: Arc<InMemoryStore>,
    pub party_id: PartyId,
    /// Party leader, verifies completions.
    pub leader_id: AdventurerId,
    /// Regular member who claims quests.
    pub member_id: AdventurerId,
}

impl E2EContext {
    /// Engine where loot never drops.
    pub async fn new() -> Self {
        Self::with_random(Arc::new(SequenceRandom::no_loot())).await
    }

    pub async fn with_random(random: Arc<dyn RandomPort>) -> Self {
        Self::build(random, AttributeScores::ZERO).await
    }

    /// Engine whose member starts with `attributes`.
    pub async fn with_member_attributes(attributes: AttributeScores) -> Self {
        Self::build(Arc::new(SequenceRandom::no_loot()), attributes).await
    }

    async fn build(random: Arc<dyn RandomPort>, member_attributes: AttributeScores) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repos = Repositories {
            party: store.clone(),
            adventurer: store.clone(),
            quest: store.clone(),
            completion: store.clone(),
            loot: store.clone(),
            activity: store.clone(),
        };
        let app = App::new(
            repos,
            Arc::new(FixedClock(fixed_time())),
            random,
            EngineConfig::default(),
        );

        let party_id = PartyId::new();
        let leader = seed_adventurer(&store, party_id, "gandalf", "Gandalf", AttributeScores::ZERO).await;
        let member = seed_adventurer(&store, party_id, "arya", "Arya", member_attributes).await;

        let party = Party::new(
            PartyName::new("The Tidy Fellowship").unwrap(),
            "TIDY42",
            leader,
            fixed_time(),
        )
        .with_id(party_id);
        PartyRepo::save(store.as_ref(), &party).await.unwrap();

        Self {
            api: Arc::new(CommandApi::new(Arc::new(app))),
            store,
            party_id,
            leader_id: leader,
            member_id: member,
        }
    }

    /// Seed an adventurer in this context's party.
    pub async fn add_member(&self, username: &str) -> AdventurerId {
        seed_adventurer(&self.store, self.party_id, username, username, AttributeScores::ZERO).await
    }

    /// Seed an adventurer who belongs to some other party.
    pub async fn add_outsider(&self, username: &str) -> AdventurerId {
        seed_adventurer(&self.store, PartyId::new(), username, username, AttributeScores::ZERO).await
    }

    /// Seed an active quest in this context's party.
    pub async fn add_quest(&self, title: &str, rewards: RewardSnapshot) -> QuestId {
        let quest = Quest::new(
            self.party_id,
            QuestTitle::new(title).unwrap(),
            rewards,
            self.leader_id,
            fixed_time(),
        )
        .unwrap();
        QuestRepo::save(self.store.as_ref(), &quest).await.unwrap();
        quest.id()
    }

    pub async fn claim(&self, quest_id: QuestId, adventurer_id: AdventurerId) -> AppResult<QuestCompletionDto> {
        self.api
            .claim_quest(ClaimQuestCommand {
                quest_id: quest_id.to_uuid(),
                adventurer_id: adventurer_id.to_uuid(),
            })
            .await
    }

    pub async fn complete(&self, completion_id: Uuid, adventurer_id: AdventurerId) -> AppResult<QuestCompletionDto> {
        self.api
            .complete_quest(CompleteQuestCommand {
                completion_id,
                adventurer_id: adventurer_id.to_uuid(),
            })
            .await
    }

    pub async fn verify(&self, completion_id: Uuid, approved: bool) -> AppResult<VerificationReportDto> {
        self.api
            .verify_quest(VerifyQuestCommand {
                completion_id,
                verifier_id: self.leader_id.to_uuid(),
                approved,
            })
            .await
    }

    /// Claim, complete and verify `quest_id` as the member.
    pub async fn run_quest(&self, quest_id: QuestId, approved: bool) -> VerificationReportDto {
        let claimed = self.claim(quest_id, self.member_id).await;
        assert!(claimed.is_success(), "claim failed: {:?}", claimed.errors);
        let completion_id = claimed.data.unwrap().id;

        let completed = self.complete(completion_id, self.member_id).await;
        assert!(completed.is_success(), "complete failed: {:?}", completed.errors);

        let verified = self.verify(completion_id, approved).await;
        assert!(verified.is_success(), "verify failed: {:?}", verified.errors);
        verified.data.unwrap()
    }

    pub async fn progress(&self, adventurer_id: AdventurerId) -> AdventurerProgressDto {
        self.api
            .get_progress(GetAdventurerProgressQuery {
                adventurer_id: adventurer_id.to_uuid(),
            })
            .await
            .data
            .unwrap()
    }

    pub async fn feed(&self) -> Vec<ActivityFeedItemDto> {
        self.api
            .get_recent_activity(GetRecentActivityQuery {
                party_id: self.party_id.to_uuid(),
                count: None,
            })
            .await
            .data
            .unwrap()
    }
}

async fn seed_adventurer(
    store: &Arc<InMemoryStore>,
    party_id: PartyId,
    username: &str,
    display_name: &str,
    attributes: AttributeScores,
) -> AdventurerId {
    let adventurer = Adventurer::new(
        party_id,
        Username::new(username).unwrap(),
        DisplayName::new(display_name).unwrap(),
        fixed_time(),
    )
    .with_attributes(attributes);
    AdventurerRepo::save(store.as_ref(), &adventurer).await.unwrap();
    adventurer.id()
}

pub fn rewards(experience: i32, currency: i32, strength: i32) -> RewardSnapshot {
    RewardSnapshot::new(experience, currency, AttributeScores::new(strength, 0, 0))
}
