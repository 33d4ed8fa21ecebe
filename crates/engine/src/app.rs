//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SeededRandom, SystemClock, SystemRandom},
    config::EngineConfig,
    memory::InMemoryStore,
    ports::{
        ActivityFeedRepo, AdventurerRepo, ClockPort, LootDropRepo, PartyRepo,
        QuestCompletionRepo, QuestRepo, RandomPort,
    },
};
use crate::use_cases::{
    self,
    quest::{ClaimQuest, CompleteQuest, QuestBoard, UnclaimQuest, VerifyQuest},
};

/// Main application state.
///
/// Holds all repository ports and use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub config: EngineConfig,
}

/// Container for all repository ports.
pub struct Repositories {
    pub party: Arc<dyn PartyRepo>,
    pub adventurer: Arc<dyn AdventurerRepo>,
    pub quest: Arc<dyn QuestRepo>,
    pub completion: Arc<dyn QuestCompletionRepo>,
    pub loot: Arc<dyn LootDropRepo>,
    pub activity: Arc<dyn ActivityFeedRepo>,
}

impl Repositories {
    /// Every port backed by one shared in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            party: store.clone(),
            adventurer: store.clone(),
            quest: store.clone(),
            completion: store.clone(),
            loot: store.clone(),
            activity: store,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub progression: Arc<use_cases::ProgressionOps>,
    pub loot: Arc<use_cases::LootDropGenerator>,
    pub activity: Arc<use_cases::ActivityFeedRecorder>,
    pub quest: use_cases::QuestUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repos: Repositories,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: EngineConfig,
    ) -> Self {
        let progression = Arc::new(use_cases::ProgressionOps::new(repos.adventurer.clone()));
        let loot = Arc::new(use_cases::LootDropGenerator::new(
            repos.loot.clone(),
            repos.completion.clone(),
            random,
            clock.clone(),
        ));
        let activity = Arc::new(use_cases::ActivityFeedRecorder::new(
            repos.adventurer.clone(),
            repos.activity.clone(),
            clock.clone(),
        ));

        let quest = use_cases::QuestUseCases::new(
            Arc::new(ClaimQuest::new(
                repos.quest.clone(),
                repos.adventurer.clone(),
                repos.completion.clone(),
                clock.clone(),
            )),
            Arc::new(CompleteQuest::new(
                repos.completion.clone(),
                repos.quest.clone(),
                repos.adventurer.clone(),
                clock.clone(),
            )),
            Arc::new(UnclaimQuest::new(
                repos.completion.clone(),
                repos.quest.clone(),
                repos.adventurer.clone(),
            )),
            Arc::new(VerifyQuest::new(
                repos.completion.clone(),
                repos.quest.clone(),
                repos.adventurer.clone(),
                progression.clone(),
                loot.clone(),
                activity.clone(),
                clock,
            )),
            Arc::new(QuestBoard::new(
                repos.quest.clone(),
                repos.completion.clone(),
                repos.adventurer.clone(),
            )),
        );

        let use_cases = UseCases {
            progression,
            loot,
            activity,
            quest,
        };

        Self {
            repositories: repos,
            use_cases,
            config,
        }
    }

    /// In-memory storage, system clock, and a seeded loot RNG when the
    /// configuration names a seed.
    pub fn in_memory(config: EngineConfig) -> Self {
        let random: Arc<dyn RandomPort> = match config.loot_seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded loot RNG");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(SystemRandom::new()),
        };
        Self::new(
            Repositories::in_memory(),
            Arc::new(SystemClock::new()),
            random,
            config,
        )
    }
}
