//! Stat generators - Default stat blocks for player and AI characters

use crate::config::{EnemyConstants, PlayerConstants};
use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stats a character is constructed from, before toughness scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub base_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub search: i32,
    pub toughness: i32,
}

/// Anything that can produce a default stat block
pub trait StatGenerator {
    fn generate(&self, dice: &mut dyn Dice) -> BaseStats;
}

/// Fixed preset used for player characters that skip allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPreset {
    stats: BaseStats,
}

impl PlayerPreset {
    pub fn from_constants(constants: &PlayerConstants) -> Self {
        PlayerPreset {
            stats: BaseStats {
                base_health: constants.base_health,
                attack: constants.attack,
                defense: constants.defense,
                search: constants.search,
                toughness: constants.toughness,
            },
        }
    }

    pub fn stats(&self) -> BaseStats {
        self.stats
    }
}

impl StatGenerator for PlayerPreset {
    fn generate(&self, _dice: &mut dyn Dice) -> BaseStats {
        self.stats
    }
}

/// Randomized point-buy for AI characters
///
/// Spends `base_points + ceil(level / level_divisor)` points, each drawn
/// uniformly from attack (+2), defense (+2), search (+1) and toughness (+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointBuy {
    base_health: i32,
    points: u32,
}

impl PointBuy {
    pub fn for_level(level: u32, constants: &EnemyConstants) -> Self {
        let divisor = constants.level_divisor.max(1);
        PointBuy {
            base_health: constants.base_health,
            points: constants.base_points + level.div_ceil(divisor),
        }
    }

    /// Number of points this generator spends
    pub fn points(&self) -> u32 {
        self.points
    }
}

impl StatGenerator for PointBuy {
    fn generate(&self, dice: &mut dyn Dice) -> BaseStats {
        let mut stats = BaseStats {
            base_health: self.base_health,
            attack: 0,
            defense: 0,
            search: 0,
            toughness: 0,
        };

        for _ in 0..self.points {
            match dice.roll_below(4) {
                0 => stats.attack += 2,
                1 => stats.defense += 2,
                2 => stats.search += 1,
                _ => stats.toughness += 1,
            }
        }

        stats
    }
}

/// Allocation error for hand-built characters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("{spent} points allocated but only {budget} are available")]
    OverBudget { spent: u32, budget: u32 },
}

/// Points a player spends on each stat during creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAllocation {
    pub attack: u32,
    pub defense: u32,
    pub search: u32,
    pub toughness: u32,
}

impl StatAllocation {
    /// Stat gained per point of attack
    pub const ATTACK_PER_POINT: i32 = 3;
    /// Stat gained per point of defense
    pub const DEFENSE_PER_POINT: i32 = 3;
    /// Stat gained per point of search
    pub const SEARCH_PER_POINT: i32 = 1;
    /// Toughness gained per point (+5% health each)
    pub const TOUGHNESS_PER_POINT: i32 = 1;

    /// Total points spent
    pub fn total(&self) -> u32 {
        self.attack + self.defense + self.search + self.toughness
    }

    /// Points left from `budget`, or `None` when over budget
    pub fn remaining(&self, budget: u32) -> Option<u32> {
        budget.checked_sub(self.total())
    }

    /// Check the allocation fits within `budget`
    pub fn validate(&self, budget: u32) -> Result<(), AllocationError> {
        match self.remaining(budget) {
            Some(_) => Ok(()),
            None => Err(AllocationError::OverBudget {
                spent: self.total(),
                budget,
            }),
        }
    }

    /// Convert points to stats at the fixed per-point ratios
    pub fn to_base_stats(&self, base_health: i32) -> BaseStats {
        let convert = |points: u32, ratio: i32| {
            i32::try_from(points)
                .unwrap_or(i32::MAX)
                .saturating_mul(ratio)
        };
        BaseStats {
            base_health,
            attack: convert(self.attack, Self::ATTACK_PER_POINT),
            defense: convert(self.defense, Self::DEFENSE_PER_POINT),
            search: convert(self.search, Self::SEARCH_PER_POINT),
            toughness: convert(self.toughness, Self::TOUGHNESS_PER_POINT),
        }
    }
}
