//! QuestCompletion aggregate - one adventurer's attempt at one quest
//!
//! # State machine
//!
//! ```text
//! Claimed ──complete──▶ PendingVerification ──approve──▶ Approved
//!    │                                     └──reject───▶ Rejected
//!    └──unclaim──▶ (record deleted)
//! ```
//!
//! Approved and Rejected are terminal. Every transition method checks the
//! current status and returns `DomainError::InvalidStateTransition` otherwise,
//! leaving the record untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregates::quest::Quest;
use crate::error::DomainError;
use crate::value_objects::RewardSnapshot;
use crate::{AdventurerId, QuestCompletionId, QuestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionStatus {
    Claimed,
    PendingVerification,
    Approved,
    Rejected,
}

impl CompletionStatus {
    /// Claimed and PendingVerification block other claims on the same quest.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            CompletionStatus::Claimed | CompletionStatus::PendingVerification
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CompletionStatus::Approved | CompletionStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompletionStatus::Claimed => "Claimed",
            CompletionStatus::PendingVerification => "PendingVerification",
            CompletionStatus::Approved => "Approved",
            CompletionStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCompletion {
    id: QuestCompletionId,
    quest_id: QuestId,
    adventurer_id: AdventurerId,
    status: CompletionStatus,
    /// Copied from the quest at claim time.
    rewards: RewardSnapshot,

    claimed_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    verified_at: Option<DateTime<Utc>>,
    verified_by: Option<AdventurerId>,
}

impl QuestCompletion {
    /// Claim `quest` for `adventurer_id`, snapshotting its current rewards.
    pub fn claim(quest: &Quest, adventurer_id: AdventurerId, now: DateTime<Utc>) -> Self {
        Self {
            id: QuestCompletionId::new(),
            quest_id: quest.id(),
            adventurer_id,
            status: CompletionStatus::Claimed,
            rewards: quest.rewards(),
            claimed_at: now,
            completed_at: None,
            verified_at: None,
            verified_by: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> QuestCompletionId {
        self.id
    }

    #[inline]
    pub fn quest_id(&self) -> QuestId {
        self.quest_id
    }

    #[inline]
    pub fn adventurer_id(&self) -> AdventurerId {
        self.adventurer_id
    }

    #[inline]
    pub fn status(&self) -> CompletionStatus {
        self.status
    }

    #[inline]
    pub fn rewards(&self) -> RewardSnapshot {
        self.rewards
    }

    #[inline]
    pub fn claimed_at(&self) -> DateTime<Utc> {
        self.claimed_at
    }

    #[inline]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[inline]
    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }

    #[inline]
    pub fn verified_by(&self) -> Option<AdventurerId> {
        self.verified_by
    }

    pub fn is_owned_by(&self, adventurer_id: AdventurerId) -> bool {
        self.adventurer_id == adventurer_id
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    pub fn with_id(mut self, id: QuestCompletionId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn require(&self, expected: CompletionStatus, action: &str) -> Result<(), DomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DomainError::invalid_state_transition(format!(
                "cannot {} a completion in {} status",
                action, self.status
            )))
        }
    }

    /// Claimed -> PendingVerification.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require(CompletionStatus::Claimed, "complete")?;
        self.status = CompletionStatus::PendingVerification;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Check that the completion may be deleted by its owner.
    pub fn ensure_unclaimable(&self) -> Result<(), DomainError> {
        self.require(CompletionStatus::Claimed, "unclaim")
    }

    /// PendingVerification -> Approved.
    pub fn approve(&mut self, verifier: AdventurerId, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require(CompletionStatus::PendingVerification, "approve")?;
        self.status = CompletionStatus::Approved;
        self.stamp_verification(verifier, now);
        Ok(())
    }

    /// PendingVerification -> Rejected.
    pub fn reject(&mut self, verifier: AdventurerId, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require(CompletionStatus::PendingVerification, "reject")?;
        self.status = CompletionStatus::Rejected;
        self.stamp_verification(verifier, now);
        Ok(())
    }

    fn stamp_verification(&mut self, verifier: AdventurerId, now: DateTime<Utc>) {
        self.verified_by = Some(verifier);
        self.verified_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{AttributeScores, QuestTitle};
    use crate::PartyId;

    fn test_quest() -> Quest {
        Quest::new(
            PartyId::new(),
            QuestTitle::new("Fold laundry").unwrap(),
            RewardSnapshot::new(50, 25, AttributeScores::new(2, 0, 0)),
            AdventurerId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    fn claimed() -> QuestCompletion {
        QuestCompletion::claim(&test_quest(), AdventurerId::new(), Utc::now())
    }

    fn pending() -> QuestCompletion {
        let mut completion = claimed();
        completion.complete(Utc::now()).unwrap();
        completion
    }

    #[test]
    fn claim_snapshots_rewards() {
        let mut quest = test_quest();
        let completion = QuestCompletion::claim(&quest, AdventurerId::new(), Utc::now());

        quest
            .set_rewards(RewardSnapshot::new(999, 999, AttributeScores::new(9, 9, 9)))
            .unwrap();

        assert_eq!(completion.status(), CompletionStatus::Claimed);
        assert_eq!(completion.rewards().experience, 50);
        assert_eq!(completion.rewards().currency, 25);
        assert_eq!(completion.rewards().attributes.strength, 2);
    }

    #[test]
    fn complete_moves_to_pending_and_stamps() {
        let completion = pending();
        assert_eq!(completion.status(), CompletionStatus::PendingVerification);
        assert!(completion.completed_at().is_some());
    }

    #[test]
    fn complete_only_from_claimed() {
        let mut completion = pending();
        let err = completion.complete(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
    }

    #[test]
    fn unclaim_only_from_claimed() {
        assert!(claimed().ensure_unclaimable().is_ok());
        assert!(pending().ensure_unclaimable().is_err());

        let mut approved = pending();
        approved.approve(AdventurerId::new(), Utc::now()).unwrap();
        assert!(approved.ensure_unclaimable().is_err());

        let mut rejected = pending();
        rejected.reject(AdventurerId::new(), Utc::now()).unwrap();
        assert!(rejected.ensure_unclaimable().is_err());
    }

    #[test]
    fn approve_stamps_verifier() {
        let verifier = AdventurerId::new();
        let mut completion = pending();
        completion.approve(verifier, Utc::now()).unwrap();
        assert_eq!(completion.status(), CompletionStatus::Approved);
        assert_eq!(completion.verified_by(), Some(verifier));
        assert!(completion.verified_at().is_some());
    }

    #[test]
    fn terminal_states_reject_further_verification() {
        let mut completion = pending();
        completion.reject(AdventurerId::new(), Utc::now()).unwrap();
        let before = completion.clone();

        assert!(completion.approve(AdventurerId::new(), Utc::now()).is_err());
        assert!(completion.reject(AdventurerId::new(), Utc::now()).is_err());
        assert_eq!(completion, before);
    }

    #[test]
    fn verification_requires_pending() {
        let mut completion = claimed();
        assert!(completion.approve(AdventurerId::new(), Utc::now()).is_err());
        assert!(completion.reject(AdventurerId::new(), Utc::now()).is_err());
        assert_eq!(completion.status(), CompletionStatus::Claimed);
    }

    #[test]
    fn live_statuses() {
        assert!(CompletionStatus::Claimed.is_live());
        assert!(CompletionStatus::PendingVerification.is_live());
        assert!(!CompletionStatus::Approved.is_live());
        assert!(!CompletionStatus::Rejected.is_live());
    }
}
