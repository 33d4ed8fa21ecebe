//! Loot awarded for an approved quest. Never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{LootTemplate, Rarity};
use crate::{AdventurerId, LootDropId, QuestCompletionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    id: LootDropId,
    adventurer_id: AdventurerId,
    /// One drop per completion at most.
    completion_id: QuestCompletionId,
    name: String,
    description: String,
    rarity: Rarity,
    found_at: DateTime<Utc>,
}

impl LootDrop {
    pub fn from_template(
        template: &LootTemplate,
        adventurer_id: AdventurerId,
        completion_id: QuestCompletionId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LootDropId::new(),
            adventurer_id,
            completion_id,
            name: template.name.to_string(),
            description: template.description.to_string(),
            rarity: template.rarity,
            found_at: now,
        }
    }

    pub fn with_id(mut self, id: LootDropId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> LootDropId {
        self.id
    }

    pub fn adventurer_id(&self) -> AdventurerId {
        self.adventurer_id
    }

    pub fn completion_id(&self) -> QuestCompletionId {
        self.completion_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn found_at(&self) -> DateTime<Utc> {
        self.found_at
    }
}
