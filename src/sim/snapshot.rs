//! Read-only render data
//!
//! Built once per frame for the presentation layer. Owns its data so the
//! renderer never borrows simulation state.

use glam::Vec2;
use serde::Serialize;

use super::state::{EnemyEntity, EnemyId, PlayerEntity, SessionState};
use super::store::EntityStore;

/// HUD and game-over numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub score: u64,
    pub level: u32,
    pub eaten_count: u32,
    /// Whole seconds
    pub elapsed_time: u32,
    pub player_sides: u32,
    pub is_over: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub sides: u32,
    pub position: Vec2,
    pub dims: Vec2,
    pub rotation: f32,
}

impl From<&PlayerEntity> for PlayerView {
    fn from(player: &PlayerEntity) -> Self {
        Self {
            sides: player.sides(),
            position: player.position,
            dims: player.dims(),
            rotation: player.rotation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub sides: u32,
    pub position: Vec2,
    pub dims: Vec2,
    pub rotation: f32,
}

impl From<&EnemyEntity> for EnemyView {
    fn from(enemy: &EnemyEntity) -> Self {
        Self {
            id: enemy.id,
            sides: enemy.sides(),
            position: enemy.position,
            dims: enemy.dims(),
            rotation: enemy.rotation,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub session: SessionSnapshot,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
}

impl Snapshot {
    pub fn capture(state: &SessionState, store: &EntityStore) -> Self {
        let player = store.player().map(PlayerView::from);
        Self {
            session: SessionSnapshot {
                score: state.score,
                level: state.level,
                eaten_count: state.eaten_count,
                elapsed_time: state.elapsed_time,
                player_sides: player.as_ref().map_or(0, |p| p.sides),
                is_over: state.is_over(),
            },
            player,
            enemies: store.list_enemies().iter().map(EnemyView::from).collect(),
        }
    }

    /// JSON for the JS renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
