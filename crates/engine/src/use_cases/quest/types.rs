//! Quest lifecycle result types.

use std::fmt;

use chorewars_domain::{LevelUp, LootDrop, Milestone, QuestCompletion};

/// A completion together with the display data callers render next to it.
#[derive(Debug, Clone)]
pub struct CompletionSummary {
    pub completion: QuestCompletion,
    /// Empty when the quest could not be read back.
    pub quest_title: String,
    /// Empty when the adventurer could not be read back.
    pub username: String,
    /// The completion record no longer exists.
    pub unclaimed: bool,
}

/// One step of the approval reward cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardStep {
    ReadProgressBefore,
    AwardExperience,
    AwardCurrency,
    AwardAttributes,
    ResolveLevelUp,
    ReadProgressAfter,
    RecordQuestCompleted,
    RecordLevelUp,
    GenerateLoot,
    RecordLoot,
    RecordMilestone,
}

impl fmt::Display for RewardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadProgressBefore => "read progress before awards",
            Self::AwardExperience => "award experience",
            Self::AwardCurrency => "award currency",
            Self::AwardAttributes => "award attributes",
            Self::ResolveLevelUp => "resolve level up",
            Self::ReadProgressAfter => "read progress after awards",
            Self::RecordQuestCompleted => "record quest completed",
            Self::RecordLevelUp => "record level up",
            Self::GenerateLoot => "generate loot",
            Self::RecordLoot => "record loot",
            Self::RecordMilestone => "record milestone",
        };
        f.write_str(name)
    }
}

/// A cascade step that failed after the verdict was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardFailure {
    pub step: RewardStep,
    pub message: String,
}

impl fmt::Display for RewardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.message)
    }
}

/// Everything a verification produced.
///
/// A rejection only fills `summary`. An approval fills whatever its cascade
/// managed to apply; steps that failed are listed in `failures` and were
/// skipped, not rolled back.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub summary: CompletionSummary,
    pub level_up: Option<LevelUp>,
    pub loot: Option<LootDrop>,
    pub milestones: Vec<Milestone>,
    pub failures: Vec<RewardFailure>,
}

impl VerificationOutcome {
    pub fn rejected(summary: CompletionSummary) -> Self {
        Self {
            summary,
            level_up: None,
            loot: None,
            milestones: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.summary.completion.status() == chorewars_domain::CompletionStatus::Approved
    }
}
