//! Progression engine.
//!
//! Applies experience, currency and attribute deltas to an adventurer and
//! resolves level-ups. Knows nothing about quests. Every change goes through
//! `AdventurerRepo::update`, so concurrent awards never overwrite each other.

use std::sync::Arc;

use chorewars_domain::{Adventurer, AdventurerId, AttributeScores, DomainError, LevelUp};

use crate::infrastructure::ports::{AdventurerChange, AdventurerMutation, AdventurerRepo, RepoError};
use crate::use_cases::error::{ErrorKind, UseCaseError};

#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("User not found: {0}")]
    AdventurerNotFound(AdventurerId),
    /// The award would push a total out of range.
    #[error("{0}")]
    Overflow(DomainError),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl From<RepoError> for ProgressionError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::Rejected(domain) => Self::Overflow(domain),
            other => Self::Repo(other),
        }
    }
}

impl UseCaseError for ProgressionError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::AdventurerNotFound(_) => ErrorKind::NotFound,
            Self::Overflow(_) => ErrorKind::ValidationFailure,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

/// Progression operations over a single adventurer.
pub struct ProgressionOps {
    adventurer_repo: Arc<dyn AdventurerRepo>,
}

impl ProgressionOps {
    pub fn new(adventurer_repo: Arc<dyn AdventurerRepo>) -> Self {
        Self { adventurer_repo }
    }

    async fn apply(
        &self,
        adventurer_id: AdventurerId,
        mutate: AdventurerMutation,
    ) -> Result<AdventurerChange, ProgressionError> {
        self.adventurer_repo
            .update(adventurer_id, mutate)
            .await?
            .ok_or(ProgressionError::AdventurerNotFound(adventurer_id))
    }

    /// Add experience without resolving level-ups.
    pub async fn award_experience(
        &self,
        adventurer_id: AdventurerId,
        amount: i32,
    ) -> Result<Adventurer, ProgressionError> {
        let change = self
            .apply(
                adventurer_id,
                Box::new(move |a: &mut Adventurer| a.add_experience(amount)),
            )
            .await?;

        tracing::info!(
            adventurer_id = %adventurer_id,
            amount,
            experience = change.after.experience(),
            "Experience awarded"
        );
        Ok(change.after)
    }

    pub async fn award_currency(
        &self,
        adventurer_id: AdventurerId,
        amount: i32,
    ) -> Result<Adventurer, ProgressionError> {
        let change = self
            .apply(
                adventurer_id,
                Box::new(move |a: &mut Adventurer| a.add_currency(amount)),
            )
            .await?;

        tracing::info!(
            adventurer_id = %adventurer_id,
            amount,
            currency = change.after.currency(),
            "Currency awarded"
        );
        Ok(change.after)
    }

    pub async fn award_attributes(
        &self,
        adventurer_id: AdventurerId,
        delta: AttributeScores,
    ) -> Result<Adventurer, ProgressionError> {
        let change = self
            .apply(
                adventurer_id,
                Box::new(move |a: &mut Adventurer| a.add_attributes(delta)),
            )
            .await?;

        tracing::info!(
            adventurer_id = %adventurer_id,
            strength = delta.strength,
            intelligence = delta.intelligence,
            constitution = delta.constitution,
            "Attributes awarded"
        );
        Ok(change.after)
    }

    /// Resolve pending level-ups. `Ok(None)` means no threshold was reached.
    pub async fn check_level_up(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Option<LevelUp>, ProgressionError> {
        let change = self
            .apply(
                adventurer_id,
                Box::new(|a: &mut Adventurer| {
                    a.resolve_level_up();
                    Ok::<(), DomainError>(())
                }),
            )
            .await?;

        let (old_level, new_level) = (change.before.level(), change.after.level());
        if new_level <= old_level {
            tracing::debug!(adventurer_id = %adventurer_id, "No level up");
            return Ok(None);
        }

        tracing::info!(
            adventurer_id = %adventurer_id,
            old_level,
            new_level,
            "Adventurer leveled up"
        );
        Ok(Some(LevelUp {
            old_level,
            new_level,
        }))
    }

    /// Current progress snapshot.
    pub async fn get_progress(
        &self,
        adventurer_id: AdventurerId,
    ) -> Result<Adventurer, ProgressionError> {
        self.adventurer_repo
            .get(adventurer_id)
            .await?
            .ok_or(ProgressionError::AdventurerNotFound(adventurer_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryStore;
    use crate::infrastructure::ports::MockAdventurerRepo;
    use chorewars_domain::{DisplayName, PartyId, Username};
    use chrono::Utc;

    fn adventurer() -> Adventurer {
        Adventurer::new(
            PartyId::new(),
            Username::new("testuser").unwrap(),
            DisplayName::new("Test User").unwrap(),
            Utc::now(),
        )
    }

    /// A mock whose `update` applies the mutation to `adventurer`.
    fn repo_with(adventurer: Adventurer) -> MockAdventurerRepo {
        let id = adventurer.id();
        let mut repo = MockAdventurerRepo::new();
        repo.expect_update()
            .withf(move |got, _| *got == id)
            .returning(move |_, mutate| {
                let before = adventurer.clone();
                let mut after = before.clone();
                mutate(&mut after).map_err(RepoError::rejected)?;
                Ok(Some(AdventurerChange { before, after }))
            });
        repo
    }

    #[tokio::test]
    async fn award_experience_adds_to_current_experience() {
        let adventurer = adventurer();
        let id = adventurer.id();
        let ops = ProgressionOps::new(Arc::new(repo_with(adventurer)));

        let updated = ops.award_experience(id, 50).await.unwrap();

        assert_eq!(updated.experience(), 50);
        assert_eq!(updated.level(), 1);
    }

    #[tokio::test]
    async fn award_experience_for_missing_adventurer_is_not_found() {
        let mut repo = MockAdventurerRepo::new();
        repo.expect_update().returning(|_, _| Ok(None));
        repo.expect_save().never();

        let ops = ProgressionOps::new(Arc::new(repo));
        let err = ops
            .award_experience(AdventurerId::new(), 50)
            .await
            .unwrap_err();

        assert!(matches!(err, ProgressionError::AdventurerNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn award_currency_accepts_negative_delta() {
        let adventurer = adventurer().with_currency(10);
        let id = adventurer.id();
        let ops = ProgressionOps::new(Arc::new(repo_with(adventurer)));

        let updated = ops.award_currency(id, -15).await.unwrap();

        assert_eq!(updated.currency(), -5);
    }

    #[tokio::test]
    async fn award_attributes_adds_each_score() {
        let adventurer = adventurer().with_attributes(AttributeScores::new(1, 2, 3));
        let id = adventurer.id();
        let ops = ProgressionOps::new(Arc::new(repo_with(adventurer)));

        let updated = ops
            .award_attributes(id, AttributeScores::new(2, 0, 5))
            .await
            .unwrap();

        assert_eq!(updated.attributes(), AttributeScores::new(3, 2, 8));
    }

    #[tokio::test]
    async fn check_level_up_resolves_multiple_levels() {
        let adventurer = adventurer().with_progress(1, 250, 100);
        let id = adventurer.id();
        let ops = ProgressionOps::new(Arc::new(repo_with(adventurer)));

        let level_up = ops.check_level_up(id).await.unwrap().unwrap();

        assert_eq!(level_up.old_level, 1);
        assert_eq!(level_up.new_level, 3);
    }

    #[tokio::test]
    async fn check_level_up_below_threshold_is_none() {
        let adventurer = adventurer().with_progress(1, 99, 100);
        let id = adventurer.id();
        let ops = ProgressionOps::new(Arc::new(repo_with(adventurer)));

        assert!(ops.check_level_up(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn storage_failure_is_internal() {
        let mut repo = MockAdventurerRepo::new();
        repo.expect_update()
            .returning(|_, _| Err(RepoError::database("update_adventurer", "disk full")));

        let ops = ProgressionOps::new(Arc::new(repo));
        let err = ops.award_currency(AdventurerId::new(), 5).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn award_past_the_integer_range_is_refused_without_panicking() {
        let store = Arc::new(InMemoryStore::new());
        let adventurer = adventurer();
        let id = adventurer.id();
        AdventurerRepo::save(store.as_ref(), &adventurer).await.unwrap();
        let ops = ProgressionOps::new(store.clone());

        ops.award_currency(id, i32::MAX).await.unwrap();
        let err = ops.award_currency(id, 1).await.unwrap_err();

        assert!(matches!(err, ProgressionError::Overflow(_)));
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(ops.get_progress(id).await.unwrap().currency(), i32::MAX);

        ops.award_experience(id, i32::MAX).await.unwrap();
        let err = ops.award_experience(id, i32::MAX).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);

        ops.award_attributes(id, AttributeScores::new(i32::MAX, 0, 0))
            .await
            .unwrap();
        let err = ops
            .award_attributes(id, AttributeScores::new(1, 0, 0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_awards_all_land() {
        let store = Arc::new(InMemoryStore::new());
        let adventurer = adventurer();
        let id = adventurer.id();
        AdventurerRepo::save(store.as_ref(), &adventurer).await.unwrap();
        let ops = Arc::new(ProgressionOps::new(store));

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let ops = ops.clone();
                tokio::spawn(async move { ops.award_experience(id, 5).await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(ops.get_progress(id).await.unwrap().experience(), 100);
    }
}
