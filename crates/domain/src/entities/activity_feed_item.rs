//! Activity feed entries - append-only, party-scoped event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ActivityId, AdventurerId, PartyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    QuestCompleted,
    LevelUp,
    LootFound,
    StatMilestone,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::QuestCompleted => write!(f, "QuestCompleted"),
            ActivityType::LevelUp => write!(f, "LevelUp"),
            ActivityType::LootFound => write!(f, "LootFound"),
            ActivityType::StatMilestone => write!(f, "StatMilestone"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFeedItem {
    id: ActivityId,
    party_id: PartyId,
    adventurer_id: AdventurerId,
    activity_type: ActivityType,
    message: String,
    /// JSON-encoded event details.
    metadata: Option<String>,
    created_at: DateTime<Utc>,
}

impl ActivityFeedItem {
    pub fn new(
        party_id: PartyId,
        adventurer_id: AdventurerId,
        activity_type: ActivityType,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            party_id,
            adventurer_id,
            activity_type,
            message: message.into(),
            metadata: None,
            created_at: now,
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn with_id(mut self, id: ActivityId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn party_id(&self) -> PartyId {
        self.party_id
    }

    pub fn adventurer_id(&self) -> AdventurerId {
        self.adventurer_id
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
