//! ChoreWars Engine - demo entry point.
//!
//! Seeds a party in memory and walks one quest through claim, completion and
//! approval, logging each envelope and printing the resulting feed.

use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chorewars_domain::{
    Adventurer, AdventurerId, AttributeScores, Difficulty, DisplayName, Party, PartyId, PartyName,
    Quest, QuestTitle, RewardSnapshot, Username,
};
use chorewars_engine::{infrastructure::config::EngineConfig, App, CommandApi};
use chorewars_shared::{
    ClaimQuestCommand, CompleteQuestCommand, GetAdventurerProgressQuery, GetRecentActivityQuery,
    VerifyQuestCommand,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();
    let config = EngineConfig::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        loot_seed = ?config.loot_seed,
        activity_feed_limit = config.activity_feed_limit,
        "Starting ChoreWars Engine"
    );

    let app = Arc::new(App::in_memory(config));
    let api = CommandApi::new(app.clone());

    // Seed a party: one leader, one member, one quest.
    let now = Utc::now();
    let party_id = PartyId::new();
    let leader_id = AdventurerId::new();
    let party = Party::new(PartyName::new("House Stark")?, "WINTER", leader_id, now)
        .with_id(party_id);
    let leader = Adventurer::new(
        party_id,
        Username::new("dm")?,
        DisplayName::new("The Dungeon Master")?,
        now,
    )
    .with_id(leader_id);
    let member = Adventurer::new(
        party.id(),
        Username::new("arya")?,
        DisplayName::new("Arya")?,
        now,
    );
    let quest = Quest::new(
        party.id(),
        QuestTitle::new("Clean the kitchen")?,
        RewardSnapshot::new(120, 25, AttributeScores::new(2, 0, 1)),
        leader.id(),
        now,
    )?
    .with_difficulty(Difficulty::Medium)
    .with_description("Dishes, counters and the floor");

    app.repositories.party.save(&party).await?;
    app.repositories.adventurer.save(&leader).await?;
    app.repositories.adventurer.save(&member).await?;
    app.repositories.quest.save(&quest).await?;

    let claimed = api
        .claim_quest(ClaimQuestCommand {
            quest_id: quest.id().to_uuid(),
            adventurer_id: member.id().to_uuid(),
        })
        .await;
    tracing::info!(envelope = %serde_json::to_string(&claimed)?, "Claim");
    let completion_id = claimed
        .data
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("claim failed: {:?}", claimed.errors))?;

    let completed = api
        .complete_quest(CompleteQuestCommand {
            completion_id,
            adventurer_id: member.id().to_uuid(),
        })
        .await;
    tracing::info!(envelope = %serde_json::to_string(&completed)?, "Complete");

    let verified = api
        .verify_quest(VerifyQuestCommand {
            completion_id,
            verifier_id: leader.id().to_uuid(),
            approved: true,
        })
        .await;
    tracing::info!(envelope = %serde_json::to_string(&verified)?, "Verify");

    let progress = api
        .get_progress(GetAdventurerProgressQuery {
            adventurer_id: member.id().to_uuid(),
        })
        .await;
    tracing::info!(envelope = %serde_json::to_string(&progress)?, "Progress");

    let feed = api
        .get_recent_activity(GetRecentActivityQuery {
            party_id: party.id().to_uuid(),
            count: None,
        })
        .await;
    for item in feed.data.unwrap_or_default() {
        println!("[{}] {}", item.created_at.format("%H:%M:%S"), item.message);
    }

    Ok(())
}

/// Load `.env.local` then `.env` from the workspace root, if present.
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
