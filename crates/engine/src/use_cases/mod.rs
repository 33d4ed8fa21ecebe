//! Use cases - User story orchestration.
//!
//! Progression, loot and activity are leaf components with no knowledge of
//! each other. The quest lifecycle drives all three on approval.

pub mod activity;
pub mod error;
pub mod loot;
pub mod progression;
pub mod quest;

pub use activity::{ActivityError, ActivityFeedRecorder};
pub use error::{ErrorKind, UseCaseError};
pub use loot::{LootDropGenerator, LootError};
pub use progression::{ProgressionError, ProgressionOps};
pub use quest::QuestUseCases;
