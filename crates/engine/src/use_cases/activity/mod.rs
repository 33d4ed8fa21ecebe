//! Activity feed recorder.
//!
//! Turns lifecycle events into rendered, party-scoped feed entries. The feed
//! is append-only.

use std::sync::Arc;

use serde_json::json;

use chorewars_domain::{
    ActivityFeedItem, ActivityType, Adventurer, AdventurerId, LevelUp, LootDrop,
    Milestone, PartyId, QuestTitle, RewardSnapshot,
};

use crate::infrastructure::ports::{ActivityFeedRepo, AdventurerRepo, ClockPort, RepoError};
use crate::use_cases::error::{ErrorKind, UseCaseError};

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("User not found: {0}")]
    AdventurerNotFound(AdventurerId),
    #[error("Failed to serialize activity metadata: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl UseCaseError for ActivityError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::AdventurerNotFound(_) => ErrorKind::NotFound,
            Self::Serialization(_) | Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

pub struct ActivityFeedRecorder {
    adventurer_repo: Arc<dyn AdventurerRepo>,
    activity_repo: Arc<dyn ActivityFeedRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ActivityFeedRecorder {
    pub fn new(
        adventurer_repo: Arc<dyn AdventurerRepo>,
        activity_repo: Arc<dyn ActivityFeedRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            adventurer_repo,
            activity_repo,
            clock,
        }
    }

    pub async fn record_quest_completed(
        &self,
        adventurer_id: AdventurerId,
        quest_title: &QuestTitle,
        rewards: RewardSnapshot,
    ) -> Result<ActivityFeedItem, ActivityError> {
        let adventurer = self.load(adventurer_id).await?;

        let gains: String = rewards
            .attributes
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(attribute, amount)| {
                format!(
                    ", {}+{} {}",
                    attribute.emoji(),
                    amount,
                    attribute.abbreviation()
                )
            })
            .collect();
        let message = format!(
            "{} vanquished {}! (+{} XP, +{} Gold{})",
            adventurer.display_name(),
            quest_title.as_str().to_uppercase(),
            rewards.experience,
            rewards.currency,
            gains
        );
        let metadata = json!({
            "quest_title": quest_title.as_str(),
            "experience_earned": rewards.experience,
            "currency_earned": rewards.currency,
            "strength_gained": rewards.attributes.strength,
            "intelligence_gained": rewards.attributes.intelligence,
            "constitution_gained": rewards.attributes.constitution,
        });

        self.append(&adventurer, ActivityType::QuestCompleted, message, metadata)
            .await
    }

    pub async fn record_level_up(
        &self,
        adventurer_id: AdventurerId,
        level_up: LevelUp,
    ) -> Result<ActivityFeedItem, ActivityError> {
        let adventurer = self.load(adventurer_id).await?;
        let message = format!(
            "🎉 {} reached Level {}!",
            adventurer.display_name(),
            level_up.new_level
        );
        let metadata = json!({
            "old_level": level_up.old_level,
            "new_level": level_up.new_level,
        });

        self.append(&adventurer, ActivityType::LevelUp, message, metadata)
            .await
    }

    pub async fn record_loot_found(
        &self,
        adventurer_id: AdventurerId,
        loot: &LootDrop,
    ) -> Result<ActivityFeedItem, ActivityError> {
        let adventurer = self.load(adventurer_id).await?;
        let message = format!(
            "🎁 {} found legendary loot: {}!",
            adventurer.display_name(),
            loot.name()
        );
        let metadata = json!({
            "loot_name": loot.name(),
            "rarity": loot.rarity().as_str(),
        });

        self.append(&adventurer, ActivityType::LootFound, message, metadata)
            .await
    }

    pub async fn record_milestone(
        &self,
        adventurer_id: AdventurerId,
        milestone: &Milestone,
    ) -> Result<ActivityFeedItem, ActivityError> {
        let adventurer = self.load(adventurer_id).await?;
        let message = format!(
            "{} {}'s {} reached {}! Earned title: \"{}\"",
            milestone.attribute.emoji(),
            adventurer.display_name(),
            milestone.attribute.name(),
            milestone.value,
            milestone.title
        );
        let metadata = json!({
            "attribute": milestone.attribute.name(),
            "threshold": milestone.threshold,
            "value": milestone.value,
            "title": milestone.title,
        });

        self.append(&adventurer, ActivityType::StatMilestone, message, metadata)
            .await
    }

    /// Newest `count` items for a party. Items sharing a timestamp come back
    /// most recently recorded first.
    pub async fn recent_for_party(
        &self,
        party_id: PartyId,
        count: usize,
    ) -> Result<Vec<ActivityFeedItem>, ActivityError> {
        let mut items = self.activity_repo.list_for_party(party_id).await?;
        items.reverse();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        items.truncate(count);
        Ok(items)
    }

    async fn load(&self, adventurer_id: AdventurerId) -> Result<Adventurer, ActivityError> {
        self.adventurer_repo
            .get(adventurer_id)
            .await?
            .ok_or(ActivityError::AdventurerNotFound(adventurer_id))
    }

    async fn append(
        &self,
        adventurer: &Adventurer,
        activity_type: ActivityType,
        message: String,
        metadata: serde_json::Value,
    ) -> Result<ActivityFeedItem, ActivityError> {
        let item = ActivityFeedItem::new(
            adventurer.party_id(),
            adventurer.id(),
            activity_type,
            message,
            self.clock.now(),
        )
        .with_metadata(serde_json::to_string(&metadata)?);
        self.activity_repo.append(&item).await?;

        tracing::info!(
            party_id = %item.party_id(),
            adventurer_id = %item.adventurer_id(),
            activity_type = %activity_type,
            "Activity recorded"
        );
        Ok(item)
    }
}
