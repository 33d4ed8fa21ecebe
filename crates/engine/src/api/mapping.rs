//! Domain to wire conversions.

use chorewars_domain::{ActivityFeedItem, Adventurer, LevelUp, LootDrop, Milestone, Quest};
use chorewars_shared::{
    ActivityFeedItemDto, AdventurerProgressDto, AdventurerStatsDto, LevelUpDto, LootDropDto,
    MilestoneDto, QuestCompletionDto, QuestDto, VerificationReportDto,
};

use crate::use_cases::quest::{CompletionSummary, VerificationOutcome};

/// Status reported for a completion that was deleted by unclaiming.
pub const UNCLAIMED_STATUS: &str = "Unclaimed";

pub fn completion_dto(summary: &CompletionSummary) -> QuestCompletionDto {
    let completion = &summary.completion;
    let rewards = completion.rewards();
    let status = if summary.unclaimed {
        UNCLAIMED_STATUS.to_string()
    } else {
        completion.status().to_string()
    };

    QuestCompletionDto {
        id: completion.id().to_uuid(),
        quest_id: completion.quest_id().to_uuid(),
        quest_title: summary.quest_title.clone(),
        adventurer_id: completion.adventurer_id().to_uuid(),
        username: summary.username.clone(),
        status,
        experience_earned: rewards.experience,
        currency_earned: rewards.currency,
        strength_gained: rewards.attributes.strength,
        intelligence_gained: rewards.attributes.intelligence,
        constitution_gained: rewards.attributes.constitution,
        claimed_at: completion.claimed_at(),
        completed_at: completion.completed_at(),
        verified_at: completion.verified_at(),
        verified_by: completion.verified_by().map(|id| id.to_uuid()),
    }
}

pub fn quest_dto(quest: &Quest, is_claimed: bool) -> QuestDto {
    let rewards = quest.rewards();
    QuestDto {
        id: quest.id().to_uuid(),
        title: quest.title().to_string(),
        description: quest.description().to_string(),
        experience_reward: rewards.experience,
        currency_reward: rewards.currency,
        strength_bonus: rewards.attributes.strength,
        intelligence_bonus: rewards.attributes.intelligence,
        constitution_bonus: rewards.attributes.constitution,
        difficulty: quest.difficulty().to_string(),
        quest_type: quest.quest_type().to_string(),
        is_claimed,
    }
}

pub fn progress_dto(adventurer: &Adventurer) -> AdventurerProgressDto {
    let attributes = adventurer.attributes();
    AdventurerProgressDto {
        adventurer_id: adventurer.id().to_uuid(),
        username: adventurer.username().to_string(),
        level: adventurer.level(),
        experience: adventurer.experience(),
        experience_to_next_level: adventurer.experience_to_next_level(),
        currency: adventurer.currency(),
        strength: attributes.strength,
        intelligence: attributes.intelligence,
        constitution: attributes.constitution,
    }
}

pub fn stats_dto(adventurer: &Adventurer) -> AdventurerStatsDto {
    let attributes = adventurer.attributes();
    AdventurerStatsDto {
        adventurer_id: adventurer.id().to_uuid(),
        username: adventurer.username().to_string(),
        level: adventurer.level(),
        strength: attributes.strength,
        intelligence: attributes.intelligence,
        constitution: attributes.constitution,
    }
}

pub fn level_up_dto(level_up: LevelUp) -> LevelUpDto {
    LevelUpDto {
        old_level: level_up.old_level,
        new_level: level_up.new_level,
        message: format!("LEVEL UP! You are now level {}!", level_up.new_level),
    }
}

pub fn loot_dto(loot: &LootDrop) -> LootDropDto {
    LootDropDto {
        id: loot.id().to_uuid(),
        adventurer_id: loot.adventurer_id().to_uuid(),
        completion_id: loot.completion_id().to_uuid(),
        name: loot.name().to_string(),
        description: loot.description().to_string(),
        rarity: loot.rarity().to_string(),
        found_at: loot.found_at(),
    }
}

/// Metadata that fails to parse is dropped rather than failing the listing.
pub fn activity_dto(item: &ActivityFeedItem) -> ActivityFeedItemDto {
    let metadata = item.metadata().and_then(|raw| {
        serde_json::from_str(raw)
            .map_err(|e| {
                tracing::warn!(activity_id = %item.id(), error = %e, "Unreadable activity metadata");
            })
            .ok()
    });

    ActivityFeedItemDto {
        id: item.id().to_uuid(),
        party_id: item.party_id().to_uuid(),
        adventurer_id: item.adventurer_id().to_uuid(),
        activity_type: item.activity_type().to_string(),
        message: item.message().to_string(),
        metadata,
        created_at: item.created_at(),
    }
}

pub fn milestone_dto(milestone: &Milestone) -> MilestoneDto {
    MilestoneDto {
        attribute: milestone.attribute.name().to_string(),
        threshold: milestone.threshold,
        value: milestone.value,
        title: milestone.title.clone(),
    }
}

pub fn verification_dto(outcome: &VerificationOutcome) -> VerificationReportDto {
    VerificationReportDto {
        completion: completion_dto(&outcome.summary),
        level_up: outcome.level_up.map(level_up_dto),
        loot: outcome.loot.as_ref().map(loot_dto),
        milestones: outcome.milestones.iter().map(milestone_dto).collect(),
        reward_failures: outcome.failures.iter().map(|f| f.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorewars_domain::{
        ActivityType, AdventurerId, AttributeScores, PartyId, QuestCompletion, QuestTitle,
        RewardSnapshot,
    };
    use chrono::Utc;

    fn completion() -> QuestCompletion {
        let quest = Quest::new(
            PartyId::new(),
            QuestTitle::new("Sweep porch").unwrap(),
            RewardSnapshot::new(40, 12, AttributeScores::new(0, 3, 0)),
            AdventurerId::new(),
            Utc::now(),
        )
        .unwrap();
        QuestCompletion::claim(&quest, AdventurerId::new(), Utc::now())
    }

    #[test]
    fn unclaimed_summary_reports_unclaimed_status() {
        let summary = CompletionSummary {
            completion: completion(),
            quest_title: "Sweep porch".to_string(),
            username: "ada".to_string(),
            unclaimed: true,
        };

        let dto = completion_dto(&summary);

        assert_eq!(dto.status, "Unclaimed");
        assert_eq!(dto.experience_earned, 40);
        assert_eq!(dto.intelligence_gained, 3);
    }

    #[test]
    fn claimed_summary_reports_domain_status() {
        let summary = CompletionSummary {
            completion: completion(),
            quest_title: String::new(),
            username: String::new(),
            unclaimed: false,
        };

        assert_eq!(completion_dto(&summary).status, "Claimed");
    }

    #[test]
    fn activity_metadata_is_parsed_into_json() {
        let item = ActivityFeedItem::new(
            PartyId::new(),
            AdventurerId::new(),
            ActivityType::LevelUp,
            "🎉 Ada reached Level 2!",
            Utc::now(),
        )
        .with_metadata(r#"{"new_level":2}"#);

        let dto = activity_dto(&item);

        assert_eq!(dto.activity_type, "LevelUp");
        assert_eq!(dto.metadata.unwrap()["new_level"], 2);
    }

    #[test]
    fn level_up_message_names_new_level() {
        let dto = level_up_dto(LevelUp {
            old_level: 2,
            new_level: 4,
        });
        assert_eq!(dto.message, "LEVEL UP! You are now level 4!");
    }
}
