//! Repository port traits for storage access.
//!
//! One narrow trait per entity type. Use cases depend only on these; the
//! storage technology behind them is an adapter concern.

use async_trait::async_trait;
use chorewars_domain::{
    ActivityFeedItem, Adventurer, AdventurerId, CompletionStatus, DomainError, LootDrop, Party,
    PartyId, Quest, QuestCompletion, QuestCompletionId, QuestId,
};

use super::error::RepoError;

// =============================================================================
// Party membership
// =============================================================================

/// A mutation applied to a stored adventurer inside `AdventurerRepo::update`.
pub type AdventurerMutation = Box<dyn FnOnce(&mut Adventurer) -> Result<(), DomainError> + Send>;

/// The stored adventurer immediately before and after an update.
#[derive(Debug, Clone)]
pub struct AdventurerChange {
    pub before: Adventurer,
    pub after: Adventurer,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdventurerRepo: Send + Sync {
    async fn get(&self, id: AdventurerId) -> Result<Option<Adventurer>, RepoError>;
    /// Insert or replace.
    async fn save(&self, adventurer: &Adventurer) -> Result<(), RepoError>;

    /// Read, mutate and write one adventurer as a single atomic step.
    ///
    /// `Ok(None)` if the adventurer does not exist. A mutation error is
    /// returned as `RepoError::Rejected` and nothing is written.
    async fn update(
        &self,
        id: AdventurerId,
        mutate: AdventurerMutation,
    ) -> Result<Option<AdventurerChange>, RepoError>;

    async fn list_in_party(&self, party_id: PartyId) -> Result<Vec<Adventurer>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartyRepo: Send + Sync {
    async fn get(&self, id: PartyId) -> Result<Option<Party>, RepoError>;
    async fn save(&self, party: &Party) -> Result<(), RepoError>;
}

// =============================================================================
// Quests
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    async fn get(&self, id: QuestId) -> Result<Option<Quest>, RepoError>;
    async fn save(&self, quest: &Quest) -> Result<(), RepoError>;
    async fn list_active_in_party(&self, party_id: PartyId) -> Result<Vec<Quest>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestCompletionRepo: Send + Sync {
    async fn get(&self, id: QuestCompletionId) -> Result<Option<QuestCompletion>, RepoError>;

    /// Insert a freshly claimed completion.
    ///
    /// The live-claim check and the insert are one atomic step with respect to
    /// other claims on the same quest. Returns `RepoError::ConstraintViolation`
    /// if the quest already has a Claimed or PendingVerification completion.
    async fn insert_claim(&self, completion: &QuestCompletion) -> Result<(), RepoError>;

    /// Replace a stored completion whose status is still `expected`.
    ///
    /// The status check and the write are one atomic step. Returns
    /// `RepoError::NotFound` if the completion is gone and
    /// `RepoError::ConstraintViolation` if its status has moved on.
    async fn transition(
        &self,
        expected: CompletionStatus,
        updated: &QuestCompletion,
    ) -> Result<(), RepoError>;

    /// Remove a completion whose status is still `expected`. Errors as for
    /// `transition`.
    async fn delete(
        &self,
        id: QuestCompletionId,
        expected: CompletionStatus,
    ) -> Result<(), RepoError>;

    /// The Claimed or PendingVerification completion for a quest, if any.
    async fn find_live_for_quest(
        &self,
        quest_id: QuestId,
    ) -> Result<Option<QuestCompletion>, RepoError>;

    async fn list_live_for_adventurer(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Vec<QuestCompletion>, RepoError>;

    async fn list_with_status(
        &self,
        status: CompletionStatus,
    ) -> Result<Vec<QuestCompletion>, RepoError>;
}

// =============================================================================
// Rewards and feed
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LootDropRepo: Send + Sync {
    /// Store a new drop. A completion yields at most one drop; a second one
    /// is a `RepoError::ConstraintViolation`.
    async fn add(&self, loot: &LootDrop) -> Result<(), RepoError>;
    async fn find_for_completion(
        &self,
        completion_id: QuestCompletionId,
    ) -> Result<Option<LootDrop>, RepoError>;
    /// Drops owned by an adventurer, in insertion order.
    async fn list_for_adventurer(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Vec<LootDrop>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityFeedRepo: Send + Sync {
    /// Append a feed item. Items are never updated or removed.
    async fn append(&self, item: &ActivityFeedItem) -> Result<(), RepoError>;
    /// Items scoped to a party, in insertion order.
    async fn list_for_party(&self, party_id: PartyId) -> Result<Vec<ActivityFeedItem>, RepoError>;
}
