//! Per-tick movement
//!
//! The player follows its intent and is kept fully inside the play area.
//! Enemies drift along their velocity and are dropped once they leave the
//! spawn circle's bounding square.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::PlayArea;
use super::state::{EnemyId, PlayerEntity};
use super::store::EntityStore;
use crate::wrap_degrees;

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Direction {
    /// Unit-per-axis step (not normalized, diagonals move faster)
    pub fn step(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn is_idle(&self) -> bool {
        self.step() == Vec2::ZERO
    }
}

/// Player control input, produced by the presentation layer each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PlayerIntent {
    #[default]
    Idle,
    /// Keyboard steering at the configured speed
    Steer(Direction),
    /// Center the player on an absolute point (mouse/touch)
    Pointer(Vec2),
}

/// Keyboard and pointer state folded into one intent
///
/// Held keys always steer. The pointer only leads while no key is held and
/// is forgotten on the next key press.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    keys: Direction,
    pointer: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys_mut(&mut self) -> &mut Direction {
        self.pointer = None;
        &mut self.keys
    }

    pub fn pointer_moved(&mut self, point: Vec2) {
        self.pointer = Some(point);
    }

    pub fn intent(&self) -> PlayerIntent {
        match self.pointer {
            Some(point) if self.keys.is_idle() => PlayerIntent::Pointer(point),
            _ => PlayerIntent::Steer(self.keys),
        }
    }
}

/// Apply intent, spin the player and clamp it into `area`
pub fn apply_player_intent(
    player: &mut PlayerEntity,
    intent: &PlayerIntent,
    area: &PlayArea,
    speed: f32,
    spin: f32,
) {
    let target = match *intent {
        PlayerIntent::Idle => player.position,
        PlayerIntent::Steer(direction) => player.position + direction.step() * speed,
        PlayerIntent::Pointer(point) => point - player.dims() / 2.0,
    };
    player.position = area.clamp_box(target, player.dims());
    player.rotation = wrap_degrees(player.rotation + spin);
}

/// Advance every enemy one tick, removing the ones past `threshold`
///
/// Returns the ids of removed enemies. Escapes are misses, not scored.
pub fn advance_enemies(store: &mut EntityStore, area: &PlayArea, threshold: f32) -> Vec<EnemyId> {
    let mut escaped = Vec::new();
    store.update_enemies(|enemy| {
        enemy.position += enemy.velocity;
        enemy.rotation = wrap_degrees(enemy.rotation + enemy.spin);
        if area.beyond(enemy.position, threshold) {
            escaped.push(enemy.id);
        }
    });

    for id in &escaped {
        store.remove_enemy(*id);
    }
    if !escaped.is_empty() {
        log::debug!("{} enemies left the field", escaped.len());
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyEntity, Shape};
    use proptest::prelude::*;

    fn area() -> PlayArea {
        PlayArea::new(0.0, 0.0, 400.0, 300.0)
    }

    #[test]
    fn test_steer_moves_and_spins() {
        let mut player = PlayerEntity::centered(Vec2::new(200.0, 150.0));
        let start = player.position;
        let intent = PlayerIntent::Steer(Direction {
            up: true,
            right: true,
            ..Default::default()
        });

        apply_player_intent(&mut player, &intent, &area(), 2.0, 0.125);
        assert_eq!(player.position, start + Vec2::new(2.0, -2.0));
        assert!((player.rotation - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let direction = Direction {
            up: true,
            down: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(direction.step(), Vec2::new(-1.0, 0.0));
        assert!(Direction::default().is_idle());
    }

    #[test]
    fn test_pointer_centers_and_clamps() {
        let mut player = PlayerEntity::centered(Vec2::new(200.0, 150.0));
        apply_player_intent(
            &mut player,
            &PlayerIntent::Pointer(Vec2::new(100.0, 100.0)),
            &area(),
            0.0,
            0.0,
        );
        assert_eq!(player.center(), Vec2::new(100.0, 100.0));

        apply_player_intent(
            &mut player,
            &PlayerIntent::Pointer(Vec2::new(1000.0, -50.0)),
            &area(),
            0.0,
            0.0,
        );
        assert_eq!(player.position, Vec2::new(390.0, 0.0));
    }

    #[test]
    fn test_held_keys_win_over_pointer() {
        let mut input = InputState::new();
        input.keys_mut().right = true;
        input.pointer_moved(Vec2::new(10.0, 10.0));

        let held = Direction {
            right: true,
            ..Default::default()
        };
        assert_eq!(input.intent(), PlayerIntent::Steer(held));

        // Player keeps moving with the key still down
        let mut player = PlayerEntity::centered(Vec2::new(200.0, 150.0));
        let start = player.position;
        for _ in 0..3 {
            apply_player_intent(&mut player, &input.intent(), &area(), 2.0, 0.0);
        }
        assert_eq!(player.position, start + Vec2::new(6.0, 0.0));

        // Releasing the key does not snap back to the stale pointer
        input.keys_mut().right = false;
        assert_eq!(input.intent(), PlayerIntent::Steer(Direction::default()));

        input.pointer_moved(Vec2::new(50.0, 60.0));
        assert_eq!(input.intent(), PlayerIntent::Pointer(Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut player = PlayerEntity::centered(Vec2::new(200.0, 150.0));
        player.rotation = 359.9;
        apply_player_intent(&mut player, &PlayerIntent::Idle, &area(), 0.0, 0.125);
        assert!(player.rotation < 1.0);
    }

    #[test]
    fn test_enemies_escape_past_threshold() {
        let mut store = EntityStore::new();
        let area = area();
        let center = area.center();
        for (velocity, offset) in [
            (Vec2::new(1.0, 0.0), Vec2::new(299.5, 0.0)),
            (Vec2::new(-1.0, 0.0), Vec2::new(299.5, 0.0)),
        ] {
            let id = store.next_enemy_id();
            store.add_enemy(EnemyEntity {
                id,
                shape: Shape(1),
                size: 40.0,
                position: center + offset,
                velocity,
                rotation: 0.0,
                spin: 1.5,
            });
        }

        let escaped = advance_enemies(&mut store, &area, 300.0);
        assert_eq!(escaped.len(), 1);
        assert_eq!(store.enemy_count(), 1);
        let survivor = &store.list_enemies()[0];
        assert!((survivor.position.x - (center.x + 298.5)).abs() < 1e-3);
        assert!((survivor.rotation - 1.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..200),
            pointer in (-500.0f32..1000.0, -500.0f32..1000.0),
            grow_at in 0usize..200,
        ) {
            let area = area();
            let mut player = PlayerEntity::centered(area.center());
            apply_player_intent(&mut player, &PlayerIntent::Pointer(Vec2::new(pointer.0, pointer.1)), &area, 0.0, 0.0);

            for (i, (up, down, left, right)) in moves.into_iter().enumerate() {
                if i == grow_at {
                    player.grow();
                }
                let intent = PlayerIntent::Steer(Direction { up, down, left, right });
                apply_player_intent(&mut player, &intent, &area, 25.0, 0.125);

                prop_assert!(player.position.x >= area.left);
                prop_assert!(player.position.x <= area.right() - player.width);
                prop_assert!(player.position.y >= area.top);
                prop_assert!(player.position.y <= area.bottom() - player.size);
            }
        }
    }
}
