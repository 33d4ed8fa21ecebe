//! Loot table and the two-stage drop roll.
//!
//! A roll first decides whether anything drops at all, then picks a rarity tier
//! by cumulative weight, then picks uniformly inside that tier. Randomness is
//! injected as a closure yielding uniform values in `[0, 1)` so the domain stays
//! free of RNG dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability that an approved quest yields any loot.
pub const LOOT_DROP_CHANCE: f64 = 0.20;

/// Cumulative upper bound of the Common tier.
const COMMON_CUTOFF: f64 = 0.60;
/// Cumulative upper bound of the Uncommon tier.
const UNCOMMON_CUTOFF: f64 = 0.90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    /// Map a uniform roll in `[0, 1)` to a tier: `[0, .6)` Common,
    /// `[.6, .9)` Uncommon, `[.9, 1)` Rare.
    pub fn from_roll(roll: f64) -> Self {
        if roll < COMMON_CUTOFF {
            Rarity::Common
        } else if roll < UNCOMMON_CUTOFF {
            Rarity::Uncommon
        } else {
            Rarity::Rare
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry that a `LootDrop` is minted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
}

const fn item(name: &'static str, description: &'static str, rarity: Rarity) -> LootTemplate {
    LootTemplate {
        name,
        description,
        rarity,
    }
}

/// The household loot catalog.
pub static LOOT_CATALOG: [LootTemplate; 22] = [
    item("Crusty Sponge", "It's seen better days, but it's yours now!", Rarity::Common),
    item("Lost TV Remote", "Found between the couch cushions. Still sticky.", Rarity::Common),
    item("Mismatched Sock", "Its partner is lost to the ages.", Rarity::Common),
    item("Dust Bunny", "A fluffy companion from under the bed.", Rarity::Common),
    item("Empty Pen", "Ran out of ink at the worst possible moment.", Rarity::Common),
    item("Expired Coupon", "Good until last month. So close!", Rarity::Common),
    item("Mystery Stain", "We don't ask questions about this one.", Rarity::Common),
    item("Bent Paperclip", "Once held important documents together.", Rarity::Common),
    item("Crumb Collection", "Archaeological evidence of last week's snacks.", Rarity::Common),
    item("Forgotten Receipt", "From a store that no longer exists.", Rarity::Common),
    item("Golden Spatula", "Flips pancakes with legendary precision!", Rarity::Uncommon),
    item("Enchanted Feather Duster", "+5 to cleaning speed!", Rarity::Uncommon),
    item("Magical Laundry Basket", "Never overflows, somehow.", Rarity::Uncommon),
    item("Singing Vacuum Cleaner", "Hums a cheerful tune while working.", Rarity::Uncommon),
    item("Self-Organizing Drawer", "Items arrange themselves. Probably.", Rarity::Uncommon),
    item("Lucky Dish Towel", "Dishes almost wash themselves!", Rarity::Uncommon),
    item("Perpetual Calendar", "Always shows the right date. Magic!", Rarity::Uncommon),
    item("Sword of Dish Slaying", "Legendary weapon against dirty plates!", Rarity::Rare),
    item("Crown of the Chore Champion", "Worn by household heroes!", Rarity::Rare),
    item("Staff of Infinite Motivation", "+100 willpower to do chores!", Rarity::Rare),
    item("Cape of Stain Resistance", "Spills fear this legendary garment!", Rarity::Rare),
    item("Amulet of Time Management", "Grants the power of productivity!", Rarity::Rare),
];

/// Catalog entries of a single tier, in catalog order.
pub fn catalog_tier(rarity: Rarity) -> Vec<&'static LootTemplate> {
    LOOT_CATALOG.iter().filter(|t| t.rarity == rarity).collect()
}

/// Pick an index in `0..len` from a uniform roll in `[0, 1)`.
fn index_from_roll(roll: f64, len: usize) -> usize {
    let index = (roll * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

/// Roll for loot against `LOOT_CATALOG`.
///
/// `next_roll` is called once for the drop check and, if something drops,
/// twice more: once for the tier and once for the entry within the tier.
pub fn roll_loot<F>(next_roll: F) -> Option<&'static LootTemplate>
where
    F: FnMut() -> f64,
{
    roll_loot_from(&LOOT_CATALOG, next_roll)
}

/// Roll for loot against an arbitrary catalog. A tier with no entries yields
/// no drop.
pub fn roll_loot_from<F>(catalog: &'static [LootTemplate], mut next_roll: F) -> Option<&'static LootTemplate>
where
    F: FnMut() -> f64,
{
    if next_roll() > LOOT_DROP_CHANCE {
        return None;
    }

    let rarity = Rarity::from_roll(next_roll());
    let tier: Vec<&'static LootTemplate> =
        catalog.iter().filter(|t| t.rarity == rarity).collect();
    if tier.is_empty() {
        return None;
    }

    Some(tier[index_from_roll(next_roll(), tier.len())])
}
