//! Quest reward values.

use serde::{Deserialize, Serialize};

use super::attributes::AttributeScores;

/// Experience, currency and attribute bonuses granted by a quest.
///
/// A completion stores its own copy taken at claim time, so later edits to the
/// quest never change what a pending or resolved completion pays out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSnapshot {
    pub experience: i32,
    pub currency: i32,
    pub attributes: AttributeScores,
}

impl RewardSnapshot {
    pub fn new(experience: i32, currency: i32, attributes: AttributeScores) -> Self {
        Self {
            experience,
            currency,
            attributes,
        }
    }

    /// Validate a reward table entered for a quest. Rewards are never negative.
    pub fn validate(&self) -> Result<(), crate::DomainError> {
        let fields = [
            ("experience", self.experience),
            ("currency", self.currency),
            ("strength", self.attributes.strength),
            ("intelligence", self.attributes.intelligence),
            ("constitution", self.attributes.constitution),
        ];
        for (field, value) in fields {
            if value < 0 {
                return Err(crate::DomainError::validation(format!(
                    "Quest {} reward cannot be negative",
                    field
                )));
            }
        }
        Ok(())
    }
}
