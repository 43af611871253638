//! Configuration loading from TOML files

mod constants;

pub use constants::{EnemyConstants, GameConstants, PlayerConstants, RuleConstants};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate game constants from a TOML file
pub fn load_game_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    constants.validate()?;
    Ok(constants)
}

/// Parse and validate game constants from a TOML string
pub fn parse_game_constants(content: &str) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = parse_toml(content)?;
    constants.validate()?;
    Ok(constants)
}

/// Game constants bundled with the crate, falling back to built-in defaults
pub fn default_game_constants() -> GameConstants {
    let toml = include_str!("../../config/game.toml");
    parse_game_constants(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_constants_match_defaults() {
        let bundled = default_game_constants();
        let defaults = GameConstants::default();
        assert_eq!(bundled, defaults);
    }

    #[test]
    fn test_validation_error_surfaces() {
        let result = parse_game_constants("[enemy]\nlevel_divisor = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let result = parse_game_constants("[player\nbase_health = 1");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_game_constants(Path::new("definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
