//! ChoreWars Shared - the contract between the engine and its callers
//!
//! This crate contains:
//! - Command and query structs, with field validation
//! - DTOs returned as payloads
//! - The uniform `AppResult` envelope every operation returns
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types and serialization
//! 2. **No domain IDs** - use raw `uuid::Uuid` in DTOs; the engine converts
//! 3. **Failures are values** - callers inspect `is_success` before `data`

pub mod dto;
pub mod requests;
pub mod responses;

pub use dto::{
    ActivityFeedItemDto, AdventurerProgressDto, AdventurerStatsDto, LevelUpDto, LootDropDto,
    MilestoneDto, QuestCompletionDto, QuestDto, VerificationReportDto,
};
pub use requests::{
    AwardAttributesCommand, AwardCurrencyCommand, AwardExperienceCommand, CheckLevelUpCommand,
    ClaimQuestCommand, CompleteQuestCommand, GetAdventurerProgressQuery, GetAdventurerStatsQuery,
    GetAvailableQuestsQuery, GetLootDropsQuery, GetMyActiveQuestsQuery,
    GetPendingVerificationsQuery, GetRecentActivityQuery, TryGenerateLootDropCommand,
    UnclaimQuestCommand, VerifyQuestCommand, MAX_ACTIVITY_PAGE,
};
pub use responses::{AppResult, ErrorCode, FieldError};
