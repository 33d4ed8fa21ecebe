//! Quest aggregate - a chore with fixed rewards, owned by a party.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{QuestTitle, RewardSnapshot};
use crate::{AdventurerId, PartyId, QuestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// How often a quest may be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestType {
    OneTime,
    Daily,
    Weekly,
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestType::OneTime => write!(f, "OneTime"),
            QuestType::Daily => write!(f, "Daily"),
            QuestType::Weekly => write!(f, "Weekly"),
        }
    }
}

/// A quest that party members can claim.
///
/// Rewards may be edited by the party leader; completions already claimed keep
/// the snapshot they took at claim time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    id: QuestId,
    party_id: PartyId,
    title: QuestTitle,
    description: String,
    rewards: RewardSnapshot,
    difficulty: Difficulty,
    quest_type: QuestType,
    is_active: bool,
    created_by: AdventurerId,
    created_at: DateTime<Utc>,
}

impl Quest {
    /// Create an active quest.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any reward is negative.
    pub fn new(
        party_id: PartyId,
        title: QuestTitle,
        rewards: RewardSnapshot,
        created_by: AdventurerId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        rewards.validate()?;
        Ok(Self {
            id: QuestId::new(),
            party_id,
            title,
            description: String::new(),
            rewards,
            difficulty: Difficulty::Easy,
            quest_type: QuestType::OneTime,
            is_active: true,
            created_by,
            created_at: now,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> QuestId {
        self.id
    }

    #[inline]
    pub fn party_id(&self) -> PartyId {
        self.party_id
    }

    #[inline]
    pub fn title(&self) -> &QuestTitle {
        &self.title
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current reward values. Copy this at claim time; never re-read it later.
    #[inline]
    pub fn rewards(&self) -> RewardSnapshot {
        self.rewards
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    pub fn quest_type(&self) -> QuestType {
        self.quest_type
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[inline]
    pub fn created_by(&self) -> AdventurerId {
        self.created_by
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    pub fn with_id(mut self, id: QuestId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_quest_type(mut self, quest_type: QuestType) -> Self {
        self.quest_type = quest_type;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Replace the reward table.
    pub fn set_rewards(&mut self, rewards: RewardSnapshot) -> Result<(), DomainError> {
        rewards.validate()?;
        self.rewards = rewards;
        Ok(())
    }

    pub fn set_title(&mut self, title: QuestTitle) {
        self.title = title;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }
}
