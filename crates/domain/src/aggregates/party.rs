//! Party aggregate - the group that shares quests and an activity feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::PartyName;
use crate::{AdventurerId, PartyId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    id: PartyId,
    name: PartyName,
    /// Code other adventurers use to join.
    invite_code: String,
    /// The party leader who verifies completed quests.
    leader_id: AdventurerId,
    created_at: DateTime<Utc>,
}

impl Party {
    pub fn new(
        name: PartyName,
        invite_code: impl Into<String>,
        leader_id: AdventurerId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PartyId::new(),
            name,
            invite_code: invite_code.into(),
            leader_id,
            created_at: now,
        }
    }

    pub fn with_id(mut self, id: PartyId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> PartyId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &PartyName {
        &self.name
    }

    #[inline]
    pub fn invite_code(&self) -> &str {
        &self.invite_code
    }

    #[inline]
    pub fn leader_id(&self) -> AdventurerId {
        self.leader_id
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
