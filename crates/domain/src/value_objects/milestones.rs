//! Attribute milestones and their flavor titles.

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, AttributeScores};

/// Attribute values that earn a title the first time they are reached.
pub const MILESTONE_THRESHOLDS: [i32; 6] = [10, 25, 50, 100, 250, 500];

/// Title earned for reaching `threshold` in `attribute`. Unmapped thresholds
/// fall back to `"<Attribute> Master"`.
pub fn milestone_title(attribute: Attribute, threshold: i32) -> String {
    let title = match (attribute, threshold) {
        (Attribute::Strength, 10) => "Apprentice Lifter",
        (Attribute::Strength, 25) => "Seasoned Hauler",
        (Attribute::Strength, 50) => "Mighty Mover",
        (Attribute::Strength, 100) => "Titan of Toil",
        (Attribute::Strength, 250) => "Herculean Housekeeper",
        (Attribute::Strength, 500) => "Legend of Labor",
        (Attribute::Intelligence, 10) => "Curious Tidier",
        (Attribute::Intelligence, 25) => "Clever Organizer",
        (Attribute::Intelligence, 50) => "Master Planner",
        (Attribute::Intelligence, 100) => "Sage of Systems",
        (Attribute::Intelligence, 250) => "Archmage of Order",
        (Attribute::Intelligence, 500) => "Omniscient Overseer",
        (Attribute::Constitution, 10) => "Steady Scrubber",
        (Attribute::Constitution, 25) => "Tireless Toiler",
        (Attribute::Constitution, 50) => "Iron Janitor",
        (Attribute::Constitution, 100) => "Unbreakable Caretaker",
        (Attribute::Constitution, 250) => "Everlasting Custodian",
        (Attribute::Constitution, 500) => "Immortal Maintainer",
        _ => return format!("{} Master", attribute.name()),
    };
    title.to_string()
}

/// First threshold, in ascending order, crossed from below by `before -> after`.
///
/// Only one threshold is reported even if a single jump crosses several.
pub fn first_crossed_threshold(before: i32, after: i32) -> Option<i32> {
    MILESTONE_THRESHOLDS
        .iter()
        .copied()
        .find(|&threshold| before < threshold && after >= threshold)
}

/// A milestone reached during one reward application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub attribute: Attribute,
    pub threshold: i32,
    /// Attribute value after the award.
    pub value: i32,
    pub title: String,
}

/// At most one milestone per attribute between two attribute snapshots.
pub fn detect_milestones(before: &AttributeScores, after: &AttributeScores) -> Vec<Milestone> {
    Attribute::ALL
        .into_iter()
        .filter_map(|attribute| {
            let value = after.get(attribute);
            first_crossed_threshold(before.get(attribute), value).map(|threshold| Milestone {
                attribute,
                threshold,
                value,
                title: milestone_title(attribute, threshold),
            })
        })
        .collect()
}
