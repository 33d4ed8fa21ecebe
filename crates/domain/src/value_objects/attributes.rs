//! Adventurer attributes (the three RPG stats raised by quests).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the three trainable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Intelligence,
    Constitution,
}

impl Attribute {
    /// All attributes in the order milestones are evaluated.
    pub const ALL: [Attribute; 3] = [
        Attribute::Strength,
        Attribute::Intelligence,
        Attribute::Constitution,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Intelligence => "Intelligence",
            Attribute::Constitution => "Constitution",
        }
    }

    /// Three-letter abbreviation used in feed messages.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Intelligence => "INT",
            Attribute::Constitution => "CON",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Attribute::Strength => "💪",
            Attribute::Intelligence => "🧠",
            Attribute::Constitution => "❤️",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strength" | "str" => Ok(Attribute::Strength),
            "intelligence" | "int" => Ok(Attribute::Intelligence),
            "constitution" | "con" => Ok(Attribute::Constitution),
            _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
        }
    }
}

/// A triple of attribute values. Used both for an adventurer's scores and for
/// the per-quest bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScores {
    pub strength: i32,
    pub intelligence: i32,
    pub constitution: i32,
}

impl AttributeScores {
    pub const ZERO: AttributeScores = AttributeScores {
        strength: 0,
        intelligence: 0,
        constitution: 0,
    };

    pub fn new(strength: i32, intelligence: i32, constitution: i32) -> Self {
        Self {
            strength,
            intelligence,
            constitution,
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Intelligence => self.intelligence,
            Attribute::Constitution => self.constitution,
        }
    }

    /// Component-wise addition. No clamping; `None` if any score overflows.
    pub fn checked_plus(self, delta: AttributeScores) -> Option<Self> {
        Some(Self {
            strength: self.strength.checked_add(delta.strength)?,
            intelligence: self.intelligence.checked_add(delta.intelligence)?,
            constitution: self.constitution.checked_add(delta.constitution)?,
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Iterate `(attribute, value)` pairs in `Attribute::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}
