//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Exposes behavior through methods, not public fields
//! - Guards its own transitions and returns `DomainError` on illegal ones

pub mod adventurer;
pub mod party;
pub mod quest;
pub mod quest_completion;

pub use adventurer::Adventurer;
pub use party::Party;
pub use quest::{Difficulty, Quest, QuestType};
pub use quest_completion::{CompletionStatus, QuestCompletion};
