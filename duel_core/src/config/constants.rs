//! Game constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub player: PlayerConstants,
    #[serde(default)]
    pub enemy: EnemyConstants,
    #[serde(default)]
    pub rules: RuleConstants,
}

impl GameConstants {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.base_health <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "player.base_health must be positive, got {}",
                self.player.base_health
            )));
        }
        if self.enemy.base_health <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "enemy.base_health must be positive, got {}",
                self.enemy.base_health
            )));
        }
        if self.enemy.level_divisor == 0 {
            return Err(ConfigError::ValidationError(
                "enemy.level_divisor must be at least 1".to_string(),
            ));
        }

        let presets = [
            ("player.attack", self.player.attack),
            ("player.defense", self.player.defense),
            ("player.search", self.player.search),
            ("player.toughness", self.player.toughness),
            ("player.defend_amount", self.player.defend_amount),
            ("enemy.defend_amount", self.enemy.defend_amount),
        ];
        if let Some((name, value)) = presets.iter().find(|(_, value)| *value < 0) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must not be negative, got {value}"
            )));
        }

        Ok(())
    }
}

/// Preset and creation rules for player-controlled characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConstants {
    /// Health before toughness scaling
    #[serde(default = "default_player_base_health")]
    pub base_health: i32,
    /// Preset attack (already multiplied: 1 point x 3)
    #[serde(default = "default_player_attack")]
    pub attack: i32,
    /// Preset defense (already multiplied: 3 points x 3)
    #[serde(default = "default_player_defense")]
    pub defense: i32,
    #[serde(default = "default_player_search")]
    pub search: i32,
    #[serde(default = "default_player_toughness")]
    pub toughness: i32,
    /// Points available when allocating stats by hand
    #[serde(default = "default_point_budget")]
    pub point_budget: u32,
    /// Defense gained by the defend action
    #[serde(default = "default_defend_amount")]
    pub defend_amount: i32,
}

impl Default for PlayerConstants {
    fn default() -> Self {
        PlayerConstants {
            base_health: default_player_base_health(),
            attack: default_player_attack(),
            defense: default_player_defense(),
            search: default_player_search(),
            toughness: default_player_toughness(),
            point_budget: default_point_budget(),
            defend_amount: default_defend_amount(),
        }
    }
}

fn default_player_base_health() -> i32 {
    100
}
fn default_player_attack() -> i32 {
    3
}
fn default_player_defense() -> i32 {
    9
}
fn default_player_search() -> i32 {
    4
}
fn default_player_toughness() -> i32 {
    2
}
fn default_point_budget() -> u32 {
    12
}
fn default_defend_amount() -> i32 {
    2
}

/// Point-buy rules for AI-controlled characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyConstants {
    /// Health before toughness scaling
    #[serde(default = "default_enemy_base_health")]
    pub base_health: i32,
    /// Points every enemy gets regardless of level
    #[serde(default = "default_base_points")]
    pub base_points: u32,
    /// One extra point per this many levels (rounded up)
    #[serde(default = "default_level_divisor")]
    pub level_divisor: u32,
    #[serde(default = "default_defend_amount")]
    pub defend_amount: i32,
}

impl Default for EnemyConstants {
    fn default() -> Self {
        EnemyConstants {
            base_health: default_enemy_base_health(),
            base_points: default_base_points(),
            level_divisor: default_level_divisor(),
            defend_amount: default_defend_amount(),
        }
    }
}

fn default_enemy_base_health() -> i32 {
    30
}
fn default_base_points() -> u32 {
    8
}
fn default_level_divisor() -> u32 {
    3
}

/// Session rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConstants {
    /// Accept the hidden `highground` / `death` commands from human players
    #[serde(default)]
    pub allow_cheats: bool,
    /// Symmetric games end in a draw after this many turns (0 = unlimited)
    #[serde(default)]
    pub max_turns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.player.base_health, 100);
        assert_eq!(constants.player.attack, 3);
        assert_eq!(constants.player.defense, 9);
        assert_eq!(constants.player.point_budget, 12);
        assert_eq!(constants.enemy.base_health, 30);
        assert_eq!(constants.enemy.base_points, 8);
        assert!(!constants.rules.allow_cheats);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[player]
base_health = 120

[rules]
allow_cheats = true
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert_eq!(constants.player.base_health, 120);
        assert_eq!(constants.player.defense, 9);
        assert_eq!(constants.enemy, EnemyConstants::default());
        assert!(constants.rules.allow_cheats);
        assert_eq!(constants.rules.max_turns, 0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut constants = GameConstants::default();
        constants.enemy.base_health = 0;
        assert!(constants.validate().is_err());

        let mut constants = GameConstants::default();
        constants.player.search = -1;
        let err = constants.validate().unwrap_err();
        assert!(err.to_string().contains("player.search"));
    }
}
