//! In-memory storage adapter implementing every repository port.
//!
//! Used by the demo binary and the end-to-end tests. Each collection sits
//! behind its own `tokio::sync::RwLock`. Every conditional write (claim
//! insert, status transition, adventurer update, loot insert) holds the
//! collection's write lock across its check.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chorewars_domain::{
    ActivityFeedItem, Adventurer, AdventurerId, CompletionStatus, LootDrop, Party, PartyId,
    Quest, QuestCompletion, QuestCompletionId, QuestId,
};

use crate::infrastructure::ports::{
    ActivityFeedRepo, AdventurerChange, AdventurerMutation, AdventurerRepo, LootDropRepo,
    PartyRepo, QuestCompletionRepo, QuestRepo, RepoError,
};

#[derive(Default)]
pub struct InMemoryStore {
    parties: RwLock<HashMap<PartyId, Party>>,
    adventurers: RwLock<HashMap<AdventurerId, Adventurer>>,
    quests: RwLock<HashMap<QuestId, Quest>>,
    /// Insertion ordered so listings are stable.
    completions: RwLock<Vec<QuestCompletion>>,
    loot: RwLock<Vec<LootDrop>>,
    activity: RwLock<Vec<ActivityFeedItem>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartyRepo for InMemoryStore {
    async fn get(&self, id: PartyId) -> Result<Option<Party>, RepoError> {
        Ok(self.parties.read().await.get(&id).cloned())
    }

    async fn save(&self, party: &Party) -> Result<(), RepoError> {
        self.parties.write().await.insert(party.id(), party.clone());
        Ok(())
    }
}

#[async_trait]
impl AdventurerRepo for InMemoryStore {
    async fn get(&self, id: AdventurerId) -> Result<Option<Adventurer>, RepoError> {
        Ok(self.adventurers.read().await.get(&id).cloned())
    }

    async fn save(&self, adventurer: &Adventurer) -> Result<(), RepoError> {
        self.adventurers
            .write()
            .await
            .insert(adventurer.id(), adventurer.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: AdventurerId,
        mutate: AdventurerMutation,
    ) -> Result<Option<AdventurerChange>, RepoError> {
        let mut adventurers = self.adventurers.write().await;
        let Some(stored) = adventurers.get_mut(&id) else {
            return Ok(None);
        };
        let before = stored.clone();
        let mut after = before.clone();
        mutate(&mut after).map_err(RepoError::rejected)?;
        *stored = after.clone();
        Ok(Some(AdventurerChange { before, after }))
    }

    async fn list_in_party(&self, party_id: PartyId) -> Result<Vec<Adventurer>, RepoError> {
        let mut members: Vec<Adventurer> = self
            .adventurers
            .read()
            .await
            .values()
            .filter(|a| a.is_member_of(party_id))
            .cloned()
            .collect();
        members.sort_by_key(|a| a.created_at());
        Ok(members)
    }
}

#[async_trait]
impl QuestRepo for InMemoryStore {
    async fn get(&self, id: QuestId) -> Result<Option<Quest>, RepoError> {
        Ok(self.quests.read().await.get(&id).cloned())
    }

    async fn save(&self, quest: &Quest) -> Result<(), RepoError> {
        self.quests.write().await.insert(quest.id(), quest.clone());
        Ok(())
    }

    async fn list_active_in_party(&self, party_id: PartyId) -> Result<Vec<Quest>, RepoError> {
        let mut quests: Vec<Quest> = self
            .quests
            .read()
            .await
            .values()
            .filter(|q| q.party_id() == party_id && q.is_active())
            .cloned()
            .collect();
        quests.sort_by_key(|q| q.created_at());
        Ok(quests)
    }
}

#[async_trait]
impl QuestCompletionRepo for InMemoryStore {
    async fn get(&self, id: QuestCompletionId) -> Result<Option<QuestCompletion>, RepoError> {
        Ok(self
            .completions
            .read()
            .await
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn insert_claim(&self, completion: &QuestCompletion) -> Result<(), RepoError> {
        let mut completions = self.completions.write().await;
        let already_claimed = completions
            .iter()
            .any(|c| c.quest_id() == completion.quest_id() && c.is_live());
        if already_claimed {
            return Err(RepoError::constraint(format!(
                "quest {} already has a live claim",
                completion.quest_id()
            )));
        }
        if completions.iter().any(|c| c.id() == completion.id()) {
            return Err(RepoError::constraint(format!(
                "completion {} already exists",
                completion.id()
            )));
        }
        completions.push(completion.clone());
        Ok(())
    }

    async fn transition(
        &self,
        expected: CompletionStatus,
        updated: &QuestCompletion,
    ) -> Result<(), RepoError> {
        let mut completions = self.completions.write().await;
        let stored = completions
            .iter_mut()
            .find(|c| c.id() == updated.id())
            .ok_or_else(|| RepoError::not_found("QuestCompletion", updated.id()))?;
        ensure_status(stored, expected)?;
        *stored = updated.clone();
        Ok(())
    }

    async fn delete(
        &self,
        id: QuestCompletionId,
        expected: CompletionStatus,
    ) -> Result<(), RepoError> {
        let mut completions = self.completions.write().await;
        let index = completions
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| RepoError::not_found("QuestCompletion", id))?;
        ensure_status(&completions[index], expected)?;
        completions.remove(index);
        Ok(())
    }

    async fn find_live_for_quest(
        &self,
        quest_id: QuestId,
    ) -> Result<Option<QuestCompletion>, RepoError> {
        Ok(self
            .completions
            .read()
            .await
            .iter()
            .find(|c| c.quest_id() == quest_id && c.is_live())
            .cloned())
    }

    async fn list_live_for_adventurer(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Vec<QuestCompletion>, RepoError> {
        Ok(self
            .completions
            .read()
            .await
            .iter()
            .filter(|c| c.is_owned_by(adventurer_id) && c.is_live())
            .cloned()
            .collect())
    }

    async fn list_with_status(
        &self,
        status: CompletionStatus,
    ) -> Result<Vec<QuestCompletion>, RepoError> {
        Ok(self
            .completions
            .read()
            .await
            .iter()
            .filter(|c| c.status() == status)
            .cloned()
            .collect())
    }
}

fn ensure_status(stored: &QuestCompletion, expected: CompletionStatus) -> Result<(), RepoError> {
    if stored.status() != expected {
        return Err(RepoError::constraint(format!(
            "completion {} is {}, expected {}",
            stored.id(),
            stored.status(),
            expected
        )));
    }
    Ok(())
}

#[async_trait]
impl LootDropRepo for InMemoryStore {
    async fn add(&self, loot: &LootDrop) -> Result<(), RepoError> {
        let mut drops = self.loot.write().await;
        if drops.iter().any(|l| l.completion_id() == loot.completion_id()) {
            return Err(RepoError::constraint(format!(
                "completion {} already has a loot drop",
                loot.completion_id()
            )));
        }
        drops.push(loot.clone());
        Ok(())
    }

    async fn find_for_completion(
        &self,
        completion_id: QuestCompletionId,
    ) -> Result<Option<LootDrop>, RepoError> {
        Ok(self
            .loot
            .read()
            .await
            .iter()
            .find(|l| l.completion_id() == completion_id)
            .cloned())
    }

    async fn list_for_adventurer(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Vec<LootDrop>, RepoError> {
        Ok(self
            .loot
            .read()
            .await
            .iter()
            .filter(|l| l.adventurer_id() == adventurer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ActivityFeedRepo for InMemoryStore {
    async fn append(&self, item: &ActivityFeedItem) -> Result<(), RepoError> {
        self.activity.write().await.push(item.clone());
        Ok(())
    }

    async fn list_for_party(&self, party_id: PartyId) -> Result<Vec<ActivityFeedItem>, RepoError> {
        Ok(self
            .activity
            .read()
            .await
            .iter()
            .filter(|i| i.party_id() == party_id)
            .cloned()
            .collect())
    }
}
