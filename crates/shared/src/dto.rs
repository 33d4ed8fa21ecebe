//! Payload types carried by `AppResult`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of a quest completion record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCompletionDto {
    pub id: Uuid,
    pub quest_id: Uuid,
    pub quest_title: String,
    pub adventurer_id: Uuid,
    pub username: String,
    /// "Claimed", "PendingVerification", "Approved", "Rejected", or
    /// "Unclaimed" once the record has been deleted.
    pub status: String,
    pub experience_earned: i32,
    pub currency_earned: i32,
    pub strength_gained: i32,
    pub intelligence_gained: i32,
    pub constitution_gained: i32,
    pub claimed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<Uuid>,
}

/// A quest as shown on the quest board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub experience_reward: i32,
    pub currency_reward: i32,
    pub strength_bonus: i32,
    pub intelligence_bonus: i32,
    pub constitution_bonus: i32,
    pub difficulty: String,
    pub quest_type: String,
    pub is_claimed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerProgressDto {
    pub adventurer_id: Uuid,
    pub username: String,
    pub level: i32,
    pub experience: i32,
    pub experience_to_next_level: i32,
    pub currency: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub constitution: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerStatsDto {
    pub adventurer_id: Uuid,
    pub username: String,
    pub level: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub constitution: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpDto {
    pub old_level: i32,
    pub new_level: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDropDto {
    pub id: Uuid,
    pub adventurer_id: Uuid,
    pub completion_id: Uuid,
    pub name: String,
    pub description: String,
    pub rarity: String,
    pub found_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFeedItemDto {
    pub id: Uuid,
    pub party_id: Uuid,
    pub adventurer_id: Uuid,
    pub activity_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDto {
    pub attribute: String,
    pub threshold: i32,
    pub value: i32,
    pub title: String,
}

/// Everything that happened while verifying a completion.
///
/// `reward_failures` lists cascade steps that failed after the status change
/// was committed; earlier steps are not rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReportDto {
    pub completion: QuestCompletionDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_up: Option<LevelUpDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot: Option<LootDropDto>,
    #[serde(default)]
    pub milestones: Vec<MilestoneDto>,
    #[serde(default)]
    pub reward_failures: Vec<String>,
}
