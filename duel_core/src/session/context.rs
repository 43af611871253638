//! GameContext - Turn and enemy counters shared by one game

use crate::character::{Character, CharacterKind, PointBuy};
use crate::config::EnemyConstants;
use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counters owned by a game and lent to whatever needs them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    /// Turns played so far; the first turn played is turn 1
    pub turn: u32,
    /// AI characters created by this game, including the current ones
    pub enemies_encountered: u32,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh AI character at `turn + 1`
    pub fn spawn_enemy(&mut self, constants: &EnemyConstants, dice: &mut dyn Dice) -> Character {
        let level = self.turn + 1;
        self.enemies_encountered += 1;
        let name = format!("Random Robot {} [Lvl {}]", self.enemies_encountered, level);
        let generator = PointBuy::for_level(level, constants);
        let enemy = Character::generated(
            name,
            CharacterKind::Ai { level },
            &generator,
            constants.defend_amount,
            dice,
        );
        debug!(
            name = enemy.name(),
            level,
            points = generator.points(),
            health = enemy.current_health(),
            "spawned enemy"
        );
        enemy
    }
}
