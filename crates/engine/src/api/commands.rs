//! Command API.
//!
//! The boundary callers talk to. Every operation validates its input, runs
//! the matching use case and folds the outcome into an `AppResult`. Nothing
//! here returns `Err` or panics; failures are values on the envelope.

use std::sync::Arc;

use validator::Validate;

use chorewars_domain::{AdventurerId, AttributeScores, PartyId, QuestCompletionId, QuestId};
use chorewars_shared::{
    ActivityFeedItemDto, AdventurerProgressDto, AdventurerStatsDto, AppResult,
    AwardAttributesCommand, AwardCurrencyCommand, AwardExperienceCommand, CheckLevelUpCommand,
    ClaimQuestCommand, CompleteQuestCommand, ErrorCode, GetAdventurerProgressQuery,
    GetAdventurerStatsQuery, GetAvailableQuestsQuery, GetLootDropsQuery, GetMyActiveQuestsQuery,
    GetPendingVerificationsQuery, GetRecentActivityQuery, LevelUpDto, LootDropDto,
    QuestCompletionDto, QuestDto, TryGenerateLootDropCommand, UnclaimQuestCommand,
    VerificationReportDto, VerifyQuestCommand,
};

use super::mapping;
use crate::app::App;
use crate::use_cases::{ErrorKind, UseCaseError};

/// Message returned in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

fn error_code(kind: ErrorKind) -> ErrorCode {
    match kind {
        ErrorKind::NotFound => ErrorCode::NotFound,
        ErrorKind::InvalidState => ErrorCode::InvalidState,
        ErrorKind::Forbidden => ErrorCode::Forbidden,
        ErrorKind::Conflict => ErrorCode::Conflict,
        ErrorKind::ValidationFailure => ErrorCode::ValidationFailure,
        ErrorKind::Internal => ErrorCode::InternalError,
    }
}

/// Turn a use-case error into a failed envelope.
///
/// Internal failures are logged in full and reported generically.
fn failure<T, E: UseCaseError>(error: E, operation: &'static str) -> AppResult<T> {
    let kind = error.kind();
    if kind == ErrorKind::Internal {
        tracing::error!(error = %error, operation, "Internal error");
        return AppResult::failure(error_code(kind), INTERNAL_ERROR_MESSAGE);
    }
    tracing::debug!(error = %error, operation, "Operation refused");
    AppResult::failure(error_code(kind), error.to_string())
}

/// Fold a use-case result into an envelope, rendering the success value
/// with `render`.
fn respond<T, D, E: UseCaseError>(
    result: Result<T, E>,
    operation: &'static str,
    render: impl FnOnce(T) -> AppResult<D>,
) -> AppResult<D> {
    match result {
        Ok(value) => render(value),
        Err(e) => failure(e, operation),
    }
}

fn attributes_message(delta: AttributeScores) -> String {
    let parts: Vec<String> = delta
        .iter()
        .filter(|(_, amount)| *amount > 0)
        .map(|(attribute, amount)| format!("+{} {}", amount, attribute.name()))
        .collect();
    if parts.is_empty() {
        "No stats awarded".to_string()
    } else {
        format!("Awarded {}", parts.join(", "))
    }
}

pub struct CommandApi {
    app: Arc<App>,
}

impl CommandApi {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    // =========================================================================
    // Quest lifecycle
    // =========================================================================

    pub async fn claim_quest(&self, command: ClaimQuestCommand) -> AppResult<QuestCompletionDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .claim
            .execute(
                QuestId::from(command.quest_id),
                AdventurerId::from(command.adventurer_id),
            )
            .await;
        respond(result, "claim_quest", |summary| {
            AppResult::success(mapping::completion_dto(&summary))
                .with_message("Quest claimed successfully")
        })
    }

    pub async fn complete_quest(
        &self,
        command: CompleteQuestCommand,
    ) -> AppResult<QuestCompletionDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .complete
            .execute(
                QuestCompletionId::from(command.completion_id),
                AdventurerId::from(command.adventurer_id),
            )
            .await;
        respond(result, "complete_quest", |summary| {
            AppResult::success(mapping::completion_dto(&summary))
                .with_message("Quest marked as complete, awaiting verification")
        })
    }

    pub async fn unclaim_quest(
        &self,
        command: UnclaimQuestCommand,
    ) -> AppResult<QuestCompletionDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .unclaim
            .execute(
                QuestCompletionId::from(command.completion_id),
                AdventurerId::from(command.adventurer_id),
            )
            .await;
        respond(result, "unclaim_quest", |summary| {
            AppResult::success(mapping::completion_dto(&summary)).with_message("Quest unclaimed")
        })
    }

    /// Approve or reject. On approval the payload lists any reward steps that
    /// failed; the envelope is still a success because the verdict stands.
    pub async fn verify_quest(
        &self,
        command: VerifyQuestCommand,
    ) -> AppResult<VerificationReportDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .verify
            .execute(
                QuestCompletionId::from(command.completion_id),
                AdventurerId::from(command.verifier_id),
                command.approved,
            )
            .await;
        let message = if command.approved {
            "Quest verified and rewards granted"
        } else {
            "Quest rejected"
        };
        respond(result, "verify_quest", |outcome| {
            AppResult::success(mapping::verification_dto(&outcome)).with_message(message)
        })
    }

    // =========================================================================
    // Quest board
    // =========================================================================

    pub async fn get_available_quests(
        &self,
        query: GetAvailableQuestsQuery,
    ) -> AppResult<Vec<QuestDto>> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .board
            .available_quests(
                AdventurerId::from(query.adventurer_id),
                PartyId::from(query.party_id),
            )
            .await;
        respond(result, "get_available_quests", |quests| {
            AppResult::success(quests.iter().map(|q| mapping::quest_dto(q, false)).collect())
        })
    }

    pub async fn get_my_active_quests(
        &self,
        query: GetMyActiveQuestsQuery,
    ) -> AppResult<Vec<QuestDto>> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .board
            .my_active_quests(AdventurerId::from(query.adventurer_id))
            .await;
        respond(result, "get_my_active_quests", |quests| {
            AppResult::success(quests.iter().map(|q| mapping::quest_dto(q, true)).collect())
        })
    }

    pub async fn get_pending_verifications(
        &self,
        query: GetPendingVerificationsQuery,
    ) -> AppResult<Vec<QuestCompletionDto>> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .quest
            .board
            .pending_verifications(PartyId::from(query.party_id))
            .await;
        respond(result, "get_pending_verifications", |summaries| {
            AppResult::success(summaries.iter().map(mapping::completion_dto).collect())
        })
    }

    // =========================================================================
    // Progression
    // =========================================================================

    pub async fn award_experience(
        &self,
        command: AwardExperienceCommand,
    ) -> AppResult<AdventurerProgressDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .progression
            .award_experience(AdventurerId::from(command.adventurer_id), command.amount)
            .await;
        respond(result, "award_experience", |adventurer| {
            AppResult::success(mapping::progress_dto(&adventurer))
                .with_message(format!("Awarded {} XP", command.amount))
        })
    }

    pub async fn award_currency(
        &self,
        command: AwardCurrencyCommand,
    ) -> AppResult<AdventurerProgressDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .progression
            .award_currency(AdventurerId::from(command.adventurer_id), command.amount)
            .await;
        respond(result, "award_currency", |adventurer| {
            AppResult::success(mapping::progress_dto(&adventurer))
                .with_message(format!("Awarded {} gold", command.amount))
        })
    }

    pub async fn award_attributes(
        &self,
        command: AwardAttributesCommand,
    ) -> AppResult<AdventurerProgressDto> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let delta = AttributeScores::new(
            command.strength,
            command.intelligence,
            command.constitution,
        );
        let result = self
            .app
            .use_cases
            .progression
            .award_attributes(AdventurerId::from(command.adventurer_id), delta)
            .await;
        respond(result, "award_attributes", |adventurer| {
            AppResult::success(mapping::progress_dto(&adventurer))
                .with_message(attributes_message(delta))
        })
    }

    pub async fn check_level_up(
        &self,
        command: CheckLevelUpCommand,
    ) -> AppResult<Option<LevelUpDto>> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .progression
            .check_level_up(AdventurerId::from(command.adventurer_id))
            .await;
        respond(result, "check_level_up", |level_up| match level_up {
            Some(level_up) => {
                AppResult::success(Some(mapping::level_up_dto(level_up))).with_message("Level up!")
            }
            None => AppResult::success(None).with_message("No level up"),
        })
    }

    pub async fn get_progress(
        &self,
        query: GetAdventurerProgressQuery,
    ) -> AppResult<AdventurerProgressDto> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .progression
            .get_progress(AdventurerId::from(query.adventurer_id))
            .await;
        respond(result, "get_progress", |adventurer| {
            AppResult::success(mapping::progress_dto(&adventurer))
        })
    }

    pub async fn get_stats(&self, query: GetAdventurerStatsQuery) -> AppResult<AdventurerStatsDto> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .progression
            .get_progress(AdventurerId::from(query.adventurer_id))
            .await;
        respond(result, "get_stats", |adventurer| {
            AppResult::success(mapping::stats_dto(&adventurer))
        })
    }

    // =========================================================================
    // Loot and activity
    // =========================================================================

    /// Roll for loot on an approved completion the caller owns. A completion
    /// yields at most one drop.
    pub async fn try_generate_loot_drop(
        &self,
        command: TryGenerateLootDropCommand,
    ) -> AppResult<Option<LootDropDto>> {
        if let Err(errors) = command.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .loot
            .try_generate(
                AdventurerId::from(command.adventurer_id),
                QuestCompletionId::from(command.completion_id),
            )
            .await;
        respond(result, "try_generate_loot_drop", |loot| match loot {
            Some(loot) => AppResult::success(Some(mapping::loot_dto(&loot)))
                .with_message(format!("Legendary loot found: {}!", loot.name())),
            None => AppResult::success(None).with_message("No loot dropped this time"),
        })
    }

    pub async fn get_loot_drops(&self, query: GetLootDropsQuery) -> AppResult<Vec<LootDropDto>> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let result = self
            .app
            .use_cases
            .loot
            .list_for_adventurer(AdventurerId::from(query.adventurer_id))
            .await;
        respond(result, "get_loot_drops", |drops| {
            AppResult::success(drops.iter().map(mapping::loot_dto).collect())
        })
    }

    /// Newest first. An omitted count uses the configured page size.
    pub async fn get_recent_activity(
        &self,
        query: GetRecentActivityQuery,
    ) -> AppResult<Vec<ActivityFeedItemDto>> {
        if let Err(errors) = query.validate() {
            return errors.into();
        }
        let count = query
            .count
            .map(|c| c as usize)
            .unwrap_or(self.app.config.activity_feed_limit);
        let result = self
            .app
            .use_cases
            .activity
            .recent_for_party(PartyId::from(query.party_id), count)
            .await;
        respond(result, "get_recent_activity", |items| {
            AppResult::success(items.iter().map(mapping::activity_dto).collect())
        })
    }
}
