//! Loot drop generator.
//!
//! Rolls for an approved completion: a 20% drop chance, then a weighted
//! rarity tier, then a uniform pick within the tier. A completion never
//! yields more than one drop.

use std::sync::Arc;

use chorewars_domain::{roll_loot, AdventurerId, CompletionStatus, LootDrop, QuestCompletionId};

use crate::infrastructure::ports::{
    ClockPort, LootDropRepo, QuestCompletionRepo, RandomPort, RepoError,
};
use crate::use_cases::error::{ErrorKind, UseCaseError};

#[derive(Debug, thiserror::Error)]
pub enum LootError {
    #[error("Quest completion not found")]
    CompletionNotFound(QuestCompletionId),
    #[error("Quest completion is not approved")]
    NotApproved(QuestCompletionId),
    #[error("User is not the owner of this quest completion")]
    NotOwner(AdventurerId),
    #[error("Loot was already rolled for this quest completion")]
    AlreadyDropped(QuestCompletionId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl UseCaseError for LootError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::CompletionNotFound(_) => ErrorKind::NotFound,
            Self::NotApproved(_) => ErrorKind::InvalidState,
            Self::NotOwner(_) => ErrorKind::Forbidden,
            Self::AlreadyDropped(_) => ErrorKind::Conflict,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

pub struct LootDropGenerator {
    loot_repo: Arc<dyn LootDropRepo>,
    completion_repo: Arc<dyn QuestCompletionRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl LootDropGenerator {
    pub fn new(
        loot_repo: Arc<dyn LootDropRepo>,
        completion_repo: Arc<dyn QuestCompletionRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            loot_repo,
            completion_repo,
            random,
            clock,
        }
    }

    /// Roll for a drop on an approved completion and persist it. `Ok(None)`
    /// is the ordinary no-drop outcome.
    pub async fn try_generate(
        &self,
        adventurer_id: AdventurerId,
        completion_id: QuestCompletionId,
    ) -> Result<Option<LootDrop>, LootError> {
        let completion = self
            .completion_repo
            .get(completion_id)
            .await?
            .ok_or(LootError::CompletionNotFound(completion_id))?;
        if completion.status() != CompletionStatus::Approved {
            return Err(LootError::NotApproved(completion_id));
        }
        if !completion.is_owned_by(adventurer_id) {
            return Err(LootError::NotOwner(adventurer_id));
        }
        if self
            .loot_repo
            .find_for_completion(completion_id)
            .await?
            .is_some()
        {
            return Err(LootError::AlreadyDropped(completion_id));
        }

        let Some(loot) = self.roll(adventurer_id, completion_id) else {
            tracing::debug!(
                adventurer_id = %adventurer_id,
                completion_id = %completion_id,
                "No loot dropped"
            );
            return Ok(None);
        };

        // Two callers can pass the lookup above; the store keeps the first.
        self.loot_repo.add(&loot).await.map_err(|e| {
            if e.is_constraint_violation() {
                LootError::AlreadyDropped(completion_id)
            } else {
                LootError::Repo(e)
            }
        })?;

        tracing::info!(
            adventurer_id = %adventurer_id,
            completion_id = %completion_id,
            loot_id = %loot.id(),
            rarity = %loot.rarity(),
            name = %loot.name(),
            "Loot dropped"
        );
        Ok(Some(loot))
    }

    fn roll(
        &self,
        adventurer_id: AdventurerId,
        completion_id: QuestCompletionId,
    ) -> Option<LootDrop> {
        roll_loot(|| self.random.random_f64()).map(|template| {
            LootDrop::from_template(template, adventurer_id, completion_id, self.clock.now())
        })
    }

    /// All drops owned by an adventurer, newest first.
    pub async fn list_for_adventurer(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Vec<LootDrop>, LootError> {
        let mut drops = self.loot_repo.list_for_adventurer(adventurer_id).await?;
        // Reverse first so the stable sort keeps later inserts ahead on ties.
        drops.reverse();
        drops.sort_by(|a, b| b.found_at().cmp(&a.found_at()));
        Ok(drops)
    }
}
