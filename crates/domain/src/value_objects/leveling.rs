//! Exponential leveling curve.

use serde::{Deserialize, Serialize};

/// Experience needed to leave level 1.
pub const BASE_EXPERIENCE_THRESHOLD: i32 = 100;

/// Multiplier applied to the threshold for every level gained.
pub const THRESHOLD_GROWTH: f64 = 1.5;

/// Experience required to advance from `level` to `level + 1`.
///
/// `floor(100 * 1.5^(level - 1))`: 100, 150, 225, 337, 506, ...
pub fn experience_to_next_level(level: i32) -> i32 {
    let exponent = (level - 1).max(0);
    (f64::from(BASE_EXPERIENCE_THRESHOLD) * THRESHOLD_GROWTH.powi(exponent)).floor() as i32
}

/// One or more levels gained in a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub old_level: i32,
    pub new_level: i32,
}

impl LevelUp {
    pub fn levels_gained(&self) -> i32 {
        self.new_level - self.old_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_matches_reference_values() {
        assert_eq!(experience_to_next_level(1), 100);
        assert_eq!(experience_to_next_level(2), 150);
        assert_eq!(experience_to_next_level(3), 225);
        assert_eq!(experience_to_next_level(4), 337);
        assert_eq!(experience_to_next_level(5), 506);
    }

    #[test]
    fn levels_gained_counts_every_step() {
        let level_up = LevelUp {
            old_level: 1,
            new_level: 3,
        };
        assert_eq!(level_up.levels_gained(), 2);
    }
}
