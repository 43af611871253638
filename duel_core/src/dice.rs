//! Dice - Injectable randomness source for action resolution and AI choices

use rand::Rng;
use std::collections::VecDeque;

/// Source of uniform integer draws
///
/// Every random decision in the engine goes through this trait so tests can
/// script exact outcomes. Any `rand::Rng` is a `Dice`.
pub trait Dice {
    /// Uniform integer in `[0, upper)`. `upper` must be non-zero.
    fn roll_below(&mut self, upper: u32) -> u32;

    /// Uniform integer in `[0, 100)`
    fn roll_percent(&mut self) -> u32 {
        self.roll_below(100)
    }

    /// Uniform integer in `[1, sides]`. `sides` must be non-zero.
    fn roll_die(&mut self, sides: u32) -> u32 {
        1 + self.roll_below(sides)
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll_below(&mut self, upper: u32) -> u32 {
        self.gen_range(0..upper)
    }
}

/// Replays a fixed queue of raw `roll_below` results
///
/// Values are returned in order regardless of the requested bound, so a
/// script is written in terms of the raw draw (`roll_die(n)` adds 1 to it).
///
/// # Panics
///
/// Panics when the script runs out or a scripted value is not below the
/// requested bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
}

impl ScriptedDice {
    /// Create dice that replay `rolls` front to back
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        ScriptedDice {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Queue more rolls at the back
    pub fn push(&mut self, roll: u32) {
        self.rolls.push_back(roll);
    }

    /// Number of scripted rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll_below(&mut self, upper: u32) -> u32 {
        let roll = self
            .rolls
            .pop_front()
            .unwrap_or_else(|| panic!("scripted dice exhausted (requested roll below {upper})"));
        assert!(
            roll < upper,
            "scripted roll {roll} is out of range for roll below {upper}"
        );
        roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scripted_dice_replays_in_order() {
        let mut dice = ScriptedDice::new([3, 0, 99]);
        assert_eq!(dice.roll_below(4), 3);
        assert_eq!(dice.roll_die(6), 1);
        assert_eq!(dice.roll_percent(), 99);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_dice_panics_when_empty() {
        let mut dice = ScriptedDice::default();
        dice.roll_percent();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_scripted_dice_rejects_out_of_range() {
        let mut dice = ScriptedDice::new([4]);
        dice.roll_below(4);
    }

    #[test]
    fn test_rng_rolls_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.roll_percent() < 100);
            let die = rng.roll_die(5);
            assert!((1..=5).contains(&die));
        }
    }
}
