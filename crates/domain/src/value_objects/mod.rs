//! Value objects - Immutable objects defined by their attributes

mod attributes;
mod leveling;
mod loot;
mod milestones;
mod names;
mod rewards;

pub use attributes::{Attribute, AttributeScores};
pub use leveling::{
    experience_to_next_level, LevelUp, BASE_EXPERIENCE_THRESHOLD, THRESHOLD_GROWTH,
};
pub use loot::{
    catalog_tier, roll_loot, roll_loot_from, LootTemplate, Rarity, LOOT_CATALOG,
    LOOT_DROP_CHANCE,
};
pub use milestones::{
    detect_milestones, first_crossed_threshold, milestone_title, Milestone,
    MILESTONE_THRESHOLDS,
};
pub use names::{DisplayName, PartyName, QuestTitle, Username};
pub use rewards::RewardSnapshot;
