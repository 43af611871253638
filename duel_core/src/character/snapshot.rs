//! StatSnapshot - Read-only view of a character for reporting

use super::Character;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Copy of a character's stats at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub name: String,
    pub current_health: i32,
    pub base_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub search: i32,
    pub toughness: i32,
    pub weaken_modifier: i32,
    /// AI level, absent for player characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl StatSnapshot {
    pub fn of(character: &Character) -> Self {
        StatSnapshot {
            name: character.name().to_string(),
            current_health: character.current_health(),
            base_health: character.base_health(),
            attack: character.attack(),
            defense: character.defense(),
            search: character.search(),
            toughness: character.toughness(),
            weaken_modifier: character.weaken_modifier(),
            level: character.kind().level(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// One-line summary used in per-turn headers
    pub fn summary(&self) -> String {
        format!(
            "(Health: {} | Attack: {} | Defense: {} | Search: {})",
            self.current_health, self.attack, self.defense, self.search
        )
    }
}

/// The four-line stat sheet shown at character creation and game over
impl fmt::Display for StatSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}'s total health: {}", self.name, self.current_health)?;
        writeln!(f, "{}'s attack power: {}", self.name, self.attack)?;
        writeln!(f, "{}'s defense power: {}", self.name, self.defense)?;
        writeln!(f, "{}'s search power: {}", self.name, self.search)
    }
}
