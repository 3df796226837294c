//! Game configuration
//!
//! Tuning that the presentation layer may override, loaded from JSON.
//! Missing fields fall back to the defaults in `crate::consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::PlayArea;

/// Configuration rejected by `GameConfig::validate`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("play area must have positive size, got {width}x{height}")]
    EmptyPlayArea { width: f32, height: f32 },
    #[error("play area {field} must be finite, got {value}")]
    UnboundedPlayArea { field: &'static str, value: f32 },
    #[error("tick interval must be non-zero")]
    ZeroTick,
    #[error("spawn interval must be non-zero")]
    ZeroSpawnInterval,
    #[error("{field} must be finite and non-negative, got {value}")]
    BadScalar { field: &'static str, value: f32 },
    #[error("enemy size range is inverted: {min} > {max}")]
    InvertedSizeRange { min: f32, max: f32 },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rectangle the player is confined to and enemies aim at
    pub play_area: PlayArea,
    /// Simulation step in milliseconds
    pub tick_ms: u32,
    /// Time between enemy spawns
    pub spawn_interval_ms: u32,
    /// Keyboard movement per tick
    pub player_speed: f32,
    /// Player spin in degrees per tick
    pub player_spin: f32,
    /// Enemy spin magnitude in degrees per tick
    pub enemy_spin_max: f32,
    /// Spawn circle radius beyond half the larger play-area side
    pub spawn_margin: f32,
    pub enemy_min_size: f32,
    pub enemy_max_size: f32,
    /// Cap on fixed steps taken per rendered frame
    pub max_substeps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_area: PlayArea::new(0.0, 0.0, PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT),
            tick_ms: TICK_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            player_speed: PLAYER_SPEED,
            player_spin: PLAYER_SPIN,
            enemy_spin_max: ENEMY_SPIN_MAX,
            spawn_margin: SPAWN_MARGIN,
            enemy_min_size: ENEMY_MIN_SIZE,
            enemy_max_size: ENEMY_MAX_SIZE,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default config with a different play area
    pub fn with_play_area(play_area: PlayArea) -> Self {
        Self {
            play_area,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let area = &self.play_area;
        let edges = [
            ("left", area.left),
            ("top", area.top),
            ("width", area.width),
            ("height", area.height),
        ];
        for (field, value) in edges {
            if !value.is_finite() {
                return Err(ConfigError::UnboundedPlayArea { field, value });
            }
        }
        if !(area.width > 0.0 && area.height > 0.0) {
            return Err(ConfigError::EmptyPlayArea {
                width: area.width,
                height: area.height,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        let scalars = [
            ("player_speed", self.player_speed),
            ("player_spin", self.player_spin),
            ("enemy_spin_max", self.enemy_spin_max),
            ("spawn_margin", self.spawn_margin),
            ("enemy_min_size", self.enemy_min_size),
            ("enemy_max_size", self.enemy_max_size),
        ];
        for (field, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadScalar { field, value });
            }
        }

        if self.enemy_min_size > self.enemy_max_size {
            return Err(ConfigError::InvertedSizeRange {
                min: self.enemy_min_size,
                max: self.enemy_max_size,
            });
        }
        Ok(())
    }

    /// Ticks between enemy spawns
    pub fn spawn_interval_ticks(&self) -> u32 {
        crate::ms_to_ticks(self.spawn_interval_ms, self.tick_ms)
    }

    /// Ticks per elapsed-time second
    pub fn ticks_per_second(&self) -> u32 {
        crate::ms_to_ticks(1000, self.tick_ms)
    }

    /// Simulation step in seconds
    pub fn tick_secs(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}
