//! Entity and session state
//!
//! Plain data: players, enemies and the per-run progression counters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Run ended (terminal until reset)
    GameOver,
}

/// Polygon shape class, identified by its side count
///
/// 0 is the circle hazard and 2 is the degenerate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(pub u32);

impl Shape {
    pub const CIRCLE: Shape = Shape(0);
    pub const LINE: Shape = Shape(2);

    #[inline]
    pub fn sides(self) -> u32 {
        self.0
    }

    /// Circles end the run on contact, whatever the player's size
    #[inline]
    pub fn is_hazard(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_line(self) -> bool {
        self.0 == 2
    }

    /// Score and level progress awarded for absorbing this shape
    pub fn points(self) -> u32 {
        // Lines have always been worth 2, which is also sides + 1
        if self.is_line() { 2 } else { self.0 + 1 }
    }

    /// Polygon outline in unit box coordinates ([0, 1] on both axes)
    ///
    /// Empty for circles and lines, which the renderer draws natively.
    pub fn outline(self) -> Vec<Vec2> {
        match self.0 {
            0..=2 => Vec::new(),
            3 => vec![Vec2::new(0.5, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)],
            n => {
                let step = std::f32::consts::TAU / n as f32;
                (0..n)
                    .map(|i| {
                        let angle = step * i as f32;
                        Vec2::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
                    })
                    .collect()
            }
        }
    }
}

/// Enemy identifier, unique within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// The player-controlled polygon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntity {
    pub shape: Shape,
    /// Bounding height
    pub size: f32,
    /// Bounding width (narrow while the player is a line)
    pub width: f32,
    /// Top-left corner
    pub position: Vec2,
    /// Degrees, wraps at 360
    pub rotation: f32,
}

impl PlayerEntity {
    /// New player at the given top-left corner
    pub fn new(shape: Shape, position: Vec2) -> Self {
        let mut player = Self {
            shape,
            size: PLAYER_SIZE,
            width: PLAYER_SIZE,
            position,
            rotation: 0.0,
        };
        player.refresh_geometry();
        player
    }

    /// New line player centered in `center`
    pub fn centered(center: Vec2) -> Self {
        let mut player = Self::new(Shape(START_SIDES), Vec2::ZERO);
        player.position = center - player.dims() / 2.0;
        player
    }

    /// Re-derive bounding box from the side count
    pub fn refresh_geometry(&mut self) {
        self.size = PLAYER_SIZE;
        self.width = if self.shape.sides() <= 2 {
            PLAYER_LINE_WIDTH
        } else {
            PLAYER_SIZE
        };
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.shape.sides()
    }

    /// Bounding box (width, height)
    #[inline]
    pub fn dims(&self) -> Vec2 {
        Vec2::new(self.width, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.dims() / 2.0
    }

    /// Add one side. Side count never decreases during a run.
    pub fn grow(&mut self) {
        debug_assert!(self.shape.0 < u32::MAX, "player sides overflow");
        self.shape = Shape(self.shape.0.saturating_add(1));
        self.refresh_geometry();
    }
}

/// A drifting shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyEntity {
    pub id: EnemyId,
    pub shape: Shape,
    /// Rolled bounding diameter
    pub size: f32,
    /// Top-left corner
    pub position: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per tick
    pub spin: f32,
}

impl EnemyEntity {
    /// Bounding box (width, height); lines are thin regardless of size
    pub fn dims(&self) -> Vec2 {
        if self.shape.is_line() {
            Vec2::new(ENEMY_LINE_WIDTH, ENEMY_LINE_HEIGHT)
        } else {
            Vec2::splat(self.size)
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.dims() / 2.0
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.shape.sides()
    }
}

/// Per-run progression counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub level: u32,
    pub level_progress: u32,
    pub level_threshold: u32,
    pub eaten_count: u32,
    /// Whole seconds of running time
    pub elapsed_time: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            level_progress: 0,
            level_threshold: START_LEVEL_THRESHOLD,
            eaten_count: 0,
            elapsed_time: 0,
            time_ticks: 0,
            phase: GamePhase::Running,
        }
    }
}

impl SessionState {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
