//! Commands and queries accepted by the engine.
//!
//! Field validation happens at the boundary with `validator`; a failed check
//! turns into `AppResult::validation_failure` before any use case runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Upper bound on a single activity feed page.
pub const MAX_ACTIVITY_PAGE: u32 = 500;

fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        let mut err = ValidationError::new("nil_id");
        err.message = Some("Identifier must not be empty".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
// Quest lifecycle
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClaimQuestCommand {
    #[validate(custom(function = "not_nil"))]
    pub quest_id: Uuid,
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteQuestCommand {
    #[validate(custom(function = "not_nil"))]
    pub completion_id: Uuid,
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnclaimQuestCommand {
    #[validate(custom(function = "not_nil"))]
    pub completion_id: Uuid,
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyQuestCommand {
    #[validate(custom(function = "not_nil"))]
    pub completion_id: Uuid,
    #[validate(custom(function = "not_nil"))]
    pub verifier_id: Uuid,
    pub approved: bool,
}

// =============================================================================
// Progression
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AwardExperienceCommand {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
    #[validate(range(min = 0, message = "Experience amount cannot be negative"))]
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AwardCurrencyCommand {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
    #[validate(range(min = 0, message = "Gold amount cannot be negative"))]
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AwardAttributesCommand {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
    #[serde(default)]
    #[validate(range(min = 0, message = "Strength bonus cannot be negative"))]
    pub strength: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Intelligence bonus cannot be negative"))]
    pub intelligence: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Constitution bonus cannot be negative"))]
    pub constitution: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckLevelUpCommand {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetAdventurerProgressQuery {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetAdventurerStatsQuery {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

// =============================================================================
// Loot
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TryGenerateLootDropCommand {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
    #[validate(custom(function = "not_nil"))]
    pub completion_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetLootDropsQuery {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

// =============================================================================
// Activity feed and quest board
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetRecentActivityQuery {
    #[validate(custom(function = "not_nil"))]
    pub party_id: Uuid,
    /// Page size; the engine's configured default applies when omitted.
    #[serde(default)]
    #[validate(range(min = 1, max = 500, message = "Count must be between 1 and 500"))]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetAvailableQuestsQuery {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
    #[validate(custom(function = "not_nil"))]
    pub party_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetMyActiveQuestsQuery {
    #[validate(custom(function = "not_nil"))]
    pub adventurer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetPendingVerificationsQuery {
    #[validate(custom(function = "not_nil"))]
    pub party_id: Uuid,
}
