//! Collision detection and progression
//!
//! Contact is a two-stage test: a cheap bounding-box rejection, then a circle
//! approximation using half of each entity's bounding width as its radius.
//! Polygons and lines are not intersected exactly.
//!
//! Resolving a contact either absorbs the enemy (score, level progress and
//! possibly a level-up with player growth) or ends the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::PlayArea;
use super::state::{EnemyEntity, EnemyId, GamePhase, PlayerEntity, SessionState};
use super::store::EntityStore;
use crate::consts::LEVEL_THRESHOLD_STEP;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_corner(position: Vec2, dims: Vec2) -> Self {
        Self {
            min: position,
            max: position + dims,
        }
    }

    /// Touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched a circle
    Hazard,
    /// Touched a shape with more sides than the player
    Outsized { enemy_sides: u32, player_sides: u32 },
}

/// Result of resolving one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Enemy eaten; `level_up` carries the new level when a threshold was crossed
    Absorbed { points: u32, level_up: Option<u32> },
    /// Run ended
    GameOver(DeathCause),
    /// Run already over, or the enemy no longer exists
    Ignored,
}

/// Two-stage contact test between the player and one enemy
pub fn check_collision(player: &PlayerEntity, enemy: &EnemyEntity) -> bool {
    let a = Aabb::from_corner(player.position, player.dims());
    let b = Aabb::from_corner(enemy.position, enemy.dims());

    if !a.overlaps(&b) {
        return false;
    }

    let distance = a.center().distance(b.center());
    distance < a.width() / 2.0 + b.width() / 2.0
}

/// Resolve a contact between the player and enemy `id`
///
/// The enemy is removed from the store before any effect is applied, so it
/// can never be processed twice. Nothing changes once the run is over.
pub fn resolve_collision(
    state: &mut SessionState,
    store: &mut EntityStore,
    area: &PlayArea,
    id: EnemyId,
) -> CollisionOutcome {
    if state.is_over() {
        return CollisionOutcome::Ignored;
    }

    let Some(enemy) = store.remove_enemy(id) else {
        debug_assert!(false, "resolving unknown enemy {id:?}");
        log::warn!("Ignoring collision with unknown enemy {id:?}");
        return CollisionOutcome::Ignored;
    };
    let Some(player) = store.player_mut() else {
        debug_assert!(false, "resolving collision without a player");
        log::warn!("Ignoring collision with enemy {id:?}: no player");
        return CollisionOutcome::Ignored;
    };

    let enemy_sides = enemy.sides();
    let player_sides = player.sides();

    if enemy.shape.is_hazard() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: hit a circle at level {}", state.level);
        return CollisionOutcome::GameOver(DeathCause::Hazard);
    }

    if enemy_sides > player_sides {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: {} sides cannot eat {} sides",
            player_sides,
            enemy_sides
        );
        return CollisionOutcome::GameOver(DeathCause::Outsized {
            enemy_sides,
            player_sides,
        });
    }

    let points = enemy.shape.points();
    state.score += u64::from(points);
    state.level_progress += points;
    state.eaten_count += 1;
    log::debug!("Absorbed {} sides for {} points", enemy_sides, points);

    // One level per crossing, however far the award overshoots
    let level_up = if state.level_progress >= state.level_threshold {
        state.level += 1;
        state.level_progress = 0;
        state.level_threshold += LEVEL_THRESHOLD_STEP;

        player.grow();
        player.position = area.clamp_box(player.position, player.dims());
        log::info!(
            "Level {} reached, player now has {} sides",
            state.level,
            player.sides()
        );
        Some(state.level)
    } else {
        None
    };

    CollisionOutcome::Absorbed { points, level_up }
}
