//! Difficulty presets and session configuration
//!
//! A session consumes one `DifficultyConfig` when it starts. Configs come
//! from a preset or from JSON supplied by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Normal => "Normal",
            DifficultyLevel::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyLevel::Easy),
            "normal" | "medium" | "med" => Some(DifficultyLevel::Normal),
            "hard" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    /// Tuning values for this preset
    pub fn config(&self) -> DifficultyConfig {
        match self {
            DifficultyLevel::Easy => DifficultyConfig {
                enemy_shoot_chance: 0.005,
                enemy_spawn_interval: 90,
                powerup_spawn_interval: 600,
                boss_hp_multiplier: 0.7,
                player_damage_multiplier: 0.5,
            },
            DifficultyLevel::Normal => DifficultyConfig::default(),
            DifficultyLevel::Hard => DifficultyConfig {
                enemy_shoot_chance: 0.02,
                enemy_spawn_interval: 40,
                powerup_spawn_interval: 1200,
                boss_hp_multiplier: 1.5,
                player_damage_multiplier: 1.5,
            },
        }
    }
}

/// Session tuning consumed at session start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Probability per tick that each enemy fires
    pub enemy_shoot_chance: f64,
    /// Initial ticks between regular enemy spawns
    pub enemy_spawn_interval: u32,
    /// Ticks between timed power-up spawns
    pub powerup_spawn_interval: u32,
    /// Scales the boss's max HP
    pub boss_hp_multiplier: f32,
    /// Scales damage the player takes per hit
    pub player_damage_multiplier: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            enemy_shoot_chance: 0.01,
            enemy_spawn_interval: 60,
            powerup_spawn_interval: 900,
            boss_hp_multiplier: 1.0,
            player_damage_multiplier: 1.0,
        }
    }
}

impl DifficultyConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed = serde_json::from_str::<Self>(json)
            .map_err(ConfigError::Parse)
            .and_then(|config| config.validate().map(|()| config));
        if let Err(err) = &parsed {
            log::warn!("Rejected difficulty config: {err}");
        }
        parsed
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.enemy_shoot_chance) {
            return Err(ConfigError::OutOfRange {
                field: "enemy_shoot_chance",
                value: self.enemy_shoot_chance,
            });
        }
        if self.enemy_spawn_interval == 0 {
            return Err(ConfigError::OutOfRange {
                field: "enemy_spawn_interval",
                value: 0.0,
            });
        }
        if self.powerup_spawn_interval == 0 {
            return Err(ConfigError::OutOfRange {
                field: "powerup_spawn_interval",
                value: 0.0,
            });
        }
        if !(self.boss_hp_multiplier > 0.0 && self.boss_hp_multiplier.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "boss_hp_multiplier",
                value: self.boss_hp_multiplier as f64,
            });
        }
        if !(self.player_damage_multiplier > 0.0 && self.player_damage_multiplier.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "player_damage_multiplier",
                value: self.player_damage_multiplier as f64,
            });
        }
        Ok(())
    }
}

/// Errors from loading a difficulty config
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid difficulty config: {err}"),
            Self::OutOfRange { field, value } => {
                write!(f, "difficulty config field {field} out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}
