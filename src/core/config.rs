/// Tunable numbers for the duel — health pools, damage, pacing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything numeric about the scene that is not script text.
///
/// Every field has a default matching the staged scene, and RON overrides
/// may be partial: `(turn_limit: 40)` tunes one knob and keeps the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub player_health: u32,
    pub opponent_health: u32,
    pub king_health: u32,
    pub queen_health: u32,
    /// Inclusive bounds of the base damage roll.
    pub damage_min: u32,
    pub damage_max: u32,
    /// Added to every strike the player does not make.
    pub enemy_damage_bonus: u32,
    /// Incoming damage is divided by this (rounded down) while guarding.
    pub defend_divisor: u32,
    /// The speak action unlocks at this turn count.
    pub speak_unlock_turn: u32,
    /// Speaking at or after this turn offers the warn-or-taunt choice.
    pub warn_choice_turn: u32,
    /// The Queen drinks when the turn count reaches exactly this value,
    /// unless warned first.
    pub queen_drinks_turn: u32,
    /// Crossing this turn count ends the duel with the delayed strike.
    pub turn_limit: u32,
    /// Pause before the enemy's swing.
    pub enemy_turn_delay_ms: u64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            player_health: 100,
            opponent_health: 80,
            king_health: 60,
            queen_health: 50,
            damage_min: 5,
            damage_max: 14,
            enemy_damage_bonus: 1,
            defend_divisor: 5,
            speak_unlock_turn: 3,
            warn_choice_turn: 2,
            queen_drinks_turn: 8,
            turn_limit: 25,
            enemy_turn_delay_ms: 1000,
        }
    }
}

impl DuelConfig {
    /// Load a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<DuelConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a config from a RON string and validate it.
    pub fn parse_ron(input: &str) -> Result<DuelConfig, ConfigError> {
        let config: DuelConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_health == 0
            || self.opponent_health == 0
            || self.king_health == 0
            || self.queen_health == 0
        {
            return Err(ConfigError::Invalid("health pools must be positive".to_string()));
        }
        if self.damage_min > self.damage_max {
            return Err(ConfigError::Invalid(format!(
                "damage_min {} exceeds damage_max {}",
                self.damage_min, self.damage_max
            )));
        }
        if self.defend_divisor == 0 {
            return Err(ConfigError::Invalid("defend_divisor must be positive".to_string()));
        }
        if self.turn_limit == 0 {
            return Err(ConfigError::Invalid("turn_limit must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_staged_scene() {
        let config = DuelConfig::default();
        assert_eq!(config.player_health, 100);
        assert_eq!(config.opponent_health, 80);
        assert_eq!(config.king_health, 60);
        assert_eq!(config.queen_health, 50);
        assert_eq!(config.damage_min, 5);
        assert_eq!(config.damage_max, 14);
        assert_eq!(config.enemy_damage_bonus, 1);
        assert_eq!(config.defend_divisor, 5);
        assert_eq!(config.speak_unlock_turn, 3);
        assert_eq!(config.warn_choice_turn, 2);
        assert_eq!(config.queen_drinks_turn, 8);
        assert_eq!(config.turn_limit, 25);
        assert_eq!(config.enemy_turn_delay_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_ron_overrides_keep_defaults() {
        let config = DuelConfig::parse_ron("(turn_limit: 40, damage_max: 20)").unwrap();
        assert_eq!(config.turn_limit, 40);
        assert_eq!(config.damage_max, 20);
        assert_eq!(config.player_health, 100);
        assert_eq!(config.queen_drinks_turn, 8);
    }

    #[test]
    fn empty_ron_is_all_defaults() {
        let config = DuelConfig::parse_ron("()").unwrap();
        assert_eq!(config, DuelConfig::default());
    }

    #[test]
    fn inverted_damage_range_rejected() {
        let err = DuelConfig::parse_ron("(damage_min: 20, damage_max: 10)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_health_rejected() {
        assert!(DuelConfig::parse_ron("(opponent_health: 0)").is_err());
    }

    #[test]
    fn zero_divisor_rejected() {
        assert!(DuelConfig::parse_ron("(defend_divisor: 0)").is_err());
    }

    #[test]
    fn malformed_ron_surfaces_parse_error() {
        let err = DuelConfig::parse_ron("(turn_limit: )").unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn load_fixture_from_ron() {
        let path = std::path::PathBuf::from("tests/fixtures/quick_duel.ron");
        let config = DuelConfig::load_from_ron(&path).unwrap();
        assert_eq!(config.turn_limit, 6);
        assert_eq!(config.opponent_health, 20);
        assert_eq!(config.enemy_turn_delay_ms, 0);
    }
}
