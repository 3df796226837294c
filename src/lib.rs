//! Polygon Eater - a shape-absorbing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, progression)
//! - `platform`: Scheduler abstraction with browser and fake-clock drivers
//! - `settings`: Data-driven game configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, GameConfig};
pub use sim::{GameSession, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (50 Hz)
    pub const TICK_MS: u32 = 20;
    /// Enemy spawn cadence in milliseconds
    pub const SPAWN_INTERVAL_MS: u32 = 1000;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play area
    pub const PLAY_AREA_WIDTH: f32 = 800.0;
    pub const PLAY_AREA_HEIGHT: f32 = 600.0;

    /// Player starts as a line
    pub const START_SIDES: u32 = 2;
    /// Player bounding height (all shapes)
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Bounding width of the line player
    pub const PLAYER_LINE_WIDTH: f32 = 10.0;
    /// Keyboard movement per tick
    pub const PLAYER_SPEED: f32 = 5.0 / 3.0;
    /// Player spin in degrees per tick
    pub const PLAYER_SPIN: f32 = 1.0 / 8.0;

    /// Enemy size range (bounding diameter)
    pub const ENEMY_MIN_SIZE: f32 = 30.0;
    pub const ENEMY_MAX_SIZE: f32 = 70.0;
    /// Line enemies ignore the rolled size
    pub const ENEMY_LINE_WIDTH: f32 = 2.0;
    pub const ENEMY_LINE_HEIGHT: f32 = 50.0;
    /// Maximum enemy spin magnitude in degrees per tick
    pub const ENEMY_SPIN_MAX: f32 = 2.0;
    /// Spawn circle radius beyond half the larger play-area side
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Base enemy speed (units per tick) and per-level increment
    pub const ENEMY_BASE_SPEED: f32 = 1.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.2;
    /// Extra side classes rolled above the current level
    pub const SIDE_ROLL_BONUS: u32 = 4;

    /// Level progression defaults
    pub const START_LEVEL_THRESHOLD: u32 = 3;
    pub const LEVEL_THRESHOLD_STEP: u32 = 3;
}

/// Wrap a rotation in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(mut degrees: f32) -> f32 {
    while degrees >= 360.0 {
        degrees -= 360.0;
    }
    while degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}

/// Milliseconds to whole ticks of `tick_ms`, never less than one
#[inline]
pub fn ms_to_ticks(ms: u32, tick_ms: u32) -> u32 {
    (ms / tick_ms.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(361.5) - 1.5).abs() < 1e-4);
        assert!((wrap_degrees(-10.0) - 350.0).abs() < 1e-4);
    }

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(1000, 20), 50);
        assert_eq!(ms_to_ticks(5, 20), 1);
        assert_eq!(ms_to_ticks(1000, 0), 1000);
    }
}
