//! ChoreWars domain: adventurers, quests, and the rules that reward them.
//!
//! Pure types and invariants only. No I/O, no async, no RNG - randomness is
//! passed in as a closure where needed (see `value_objects::roll_loot`).

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    Adventurer, CompletionStatus, Difficulty, Party, Quest, QuestCompletion, QuestType,
};
pub use entities::{ActivityFeedItem, ActivityType, LootDrop};
pub use error::DomainError;
pub use ids::{ActivityId, AdventurerId, LootDropId, PartyId, QuestCompletionId, QuestId};
pub use value_objects::{
    detect_milestones, experience_to_next_level, milestone_title, roll_loot, Attribute,
    AttributeScores, DisplayName, LevelUp, LootTemplate, Milestone, PartyName, QuestTitle,
    Rarity, RewardSnapshot, Username,
};
