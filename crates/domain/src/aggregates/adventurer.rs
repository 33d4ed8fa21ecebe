//! Adventurer aggregate - a party member who claims and completes quests
//!
//! The adventurer owns all progression state: level, experience, currency and
//! attribute scores. Mutations are plain additions; leveling is resolved
//! separately by `resolve_level_up` so callers decide when to apply it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{
    experience_to_next_level, AttributeScores, DisplayName, LevelUp, Username,
};
use crate::{AdventurerId, PartyId};

/// A party member with progression state.
///
/// # Invariants
///
/// - After `resolve_level_up`, `experience < experience_to_next_level`
/// - `experience_to_next_level == experience_to_next_level(level)` once any
///   level-up has been resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adventurer {
    id: AdventurerId,
    party_id: PartyId,
    username: Username,
    display_name: DisplayName,

    level: i32,
    experience: i32,
    experience_to_next_level: i32,
    currency: i32,
    attributes: AttributeScores,

    created_at: DateTime<Utc>,
}

impl Adventurer {
    /// Create a level 1 adventurer with no experience, currency or attributes.
    pub fn new(
        party_id: PartyId,
        username: Username,
        display_name: DisplayName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AdventurerId::new(),
            party_id,
            username,
            display_name,
            level: 1,
            experience: 0,
            experience_to_next_level: experience_to_next_level(1),
            currency: 0,
            attributes: AttributeScores::ZERO,
            created_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> AdventurerId {
        self.id
    }

    #[inline]
    pub fn party_id(&self) -> PartyId {
        self.party_id
    }

    #[inline]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[inline]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.level
    }

    #[inline]
    pub fn experience(&self) -> i32 {
        self.experience
    }

    #[inline]
    pub fn experience_to_next_level(&self) -> i32 {
        self.experience_to_next_level
    }

    #[inline]
    pub fn currency(&self) -> i32 {
        self.currency
    }

    #[inline]
    pub fn attributes(&self) -> AttributeScores {
        self.attributes
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this adventurer belongs to `party_id`.
    pub fn is_member_of(&self, party_id: PartyId) -> bool {
        self.party_id == party_id
    }

    // =========================================================================
    // Builder methods (rehydration and tests)
    // =========================================================================

    pub fn with_id(mut self, id: AdventurerId) -> Self {
        self.id = id;
        self
    }

    /// Set level, experience and threshold together.
    pub fn with_progress(mut self, level: i32, experience: i32, experience_to_next_level: i32) -> Self {
        self.level = level;
        self.experience = experience;
        self.experience_to_next_level = experience_to_next_level;
        self
    }

    pub fn with_currency(mut self, currency: i32) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_attributes(mut self, attributes: AttributeScores) -> Self {
        self.attributes = attributes;
        self
    }

    // =========================================================================
    // Progression
    // =========================================================================

    /// Add experience without resolving level-ups.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the total would overflow; the
    /// adventurer is left unchanged.
    pub fn add_experience(&mut self, amount: i32) -> Result<(), DomainError> {
        self.experience = self
            .experience
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("Experience total out of range"))?;
        Ok(())
    }

    pub fn add_currency(&mut self, amount: i32) -> Result<(), DomainError> {
        self.currency = self
            .currency
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("Currency total out of range"))?;
        Ok(())
    }

    pub fn add_attributes(&mut self, delta: AttributeScores) -> Result<(), DomainError> {
        self.attributes = self
            .attributes
            .checked_plus(delta)
            .ok_or_else(|| DomainError::validation("Attribute score out of range"))?;
        Ok(())
    }

    /// Spend experience on as many levels as it covers.
    ///
    /// Each step subtracts the current threshold, increments the level and
    /// recomputes the threshold from the new level. A large award can fire
    /// several steps. Returns `None` when no level was gained.
    pub fn resolve_level_up(&mut self) -> Option<LevelUp> {
        let old_level = self.level;

        // A non-positive threshold would never terminate.
        while self.experience_to_next_level > 0 && self.experience >= self.experience_to_next_level
        {
            self.experience -= self.experience_to_next_level;
            self.level += 1;
            self.experience_to_next_level = experience_to_next_level(self.level);
        }

        (self.level > old_level).then_some(LevelUp {
            old_level,
            new_level: self.level,
        })
    }
}
