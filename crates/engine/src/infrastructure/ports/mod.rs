//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage access (one trait per entity type)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{
    ActivityFeedRepo, AdventurerChange, AdventurerMutation, AdventurerRepo, LootDropRepo,
    PartyRepo, QuestCompletionRepo, QuestRepo,
};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{
    MockActivityFeedRepo, MockAdventurerRepo, MockLootDropRepo, MockPartyRepo,
    MockQuestCompletionRepo, MockQuestRepo,
};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
