//! Quest lifecycle use cases.
//!
//! A completion moves `Claimed -> PendingVerification -> Approved | Rejected`.
//! A Claimed completion may instead be deleted by its owner.

use std::sync::Arc;

mod board;
mod claim;
mod complete;
mod error;
mod helpers;
mod types;
mod unclaim;
mod verify;

pub use board::QuestBoard;
pub use claim::ClaimQuest;
pub use complete::CompleteQuest;
pub use error::QuestError;
pub use types::{CompletionSummary, RewardFailure, RewardStep, VerificationOutcome};
pub use unclaim::UnclaimQuest;
pub use verify::VerifyQuest;

/// Container for quest lifecycle use cases.
pub struct QuestUseCases {
    pub claim: Arc<ClaimQuest>,
    pub complete: Arc<CompleteQuest>,
    pub unclaim: Arc<UnclaimQuest>,
    pub verify: Arc<VerifyQuest>,
    pub board: Arc<QuestBoard>,
}

impl QuestUseCases {
    pub fn new(
        claim: Arc<ClaimQuest>,
        complete: Arc<CompleteQuest>,
        unclaim: Arc<UnclaimQuest>,
        verify: Arc<VerifyQuest>,
        board: Arc<QuestBoard>,
    ) -> Self {
        Self {
            claim,
            complete,
            unclaim,
            verify,
            board,
        }
    }
}
