//! Fixed timestep simulation tick
//!
//! One tick: move the player, drift enemies (dropping escapees), resolve
//! contacts, then run the spawn and seconds timers. Movement always lands
//! before collision checks so contacts use this tick's positions.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Ticker;
use super::collision::{CollisionOutcome, check_collision, resolve_collision};
use super::movement::{PlayerIntent, advance_enemies, apply_player_intent};
use super::spawner::spawn_enemy;
use super::state::{EnemyId, PlayerEntity, SessionState};
use super::store::EntityStore;
use crate::settings::GameConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intent: PlayerIntent,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<EnemyId>,
    pub escaped: Vec<EnemyId>,
    pub collisions: Vec<(EnemyId, CollisionOutcome)>,
    /// The seconds counter advanced
    pub second_elapsed: bool,
}

impl TickReport {
    pub fn game_over(&self) -> bool {
        self.collisions
            .iter()
            .any(|(_, outcome)| matches!(outcome, CollisionOutcome::GameOver(_)))
    }
}

/// All mutable simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    pub state: SessionState,
    pub store: EntityStore,
    pub rng: Pcg32,
    pub spawn_timer: Ticker,
    pub second_timer: Ticker,
}

impl World {
    /// Fresh run: default counters and a centered line player
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut store = EntityStore::new();
        store.set_player(PlayerEntity::centered(config.play_area.center()));
        Self {
            spawn_timer: Ticker::new(config.spawn_interval_ticks()),
            second_timer: Ticker::new(config.ticks_per_second()),
            state: SessionState::default(),
            store,
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    /// Distance from the center beyond which enemies are dropped
    pub fn escape_threshold(&self) -> f32 {
        self.config.play_area.spawn_distance(self.config.spawn_margin)
    }

    /// Resolve a contact with one enemy
    pub fn resolve(&mut self, id: EnemyId) -> CollisionOutcome {
        resolve_collision(&mut self.state, &mut self.store, &self.config.play_area, id)
    }
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();

    // Terminal: nothing moves, spawns or scores
    if world.state.is_over() {
        return report;
    }
    world.state.time_ticks += 1;

    let area = world.config.play_area;
    if let Some(player) = world.store.player_mut() {
        apply_player_intent(
            player,
            &input.intent,
            &area,
            world.config.player_speed,
            world.config.player_spin,
        );
    }

    let threshold = world.escape_threshold();
    report.escaped = advance_enemies(&mut world.store, &area, threshold);

    for id in world.store.enemy_ids() {
        if world.state.is_over() {
            break;
        }
        let hit = match (world.store.player(), world.store.enemy(id)) {
            (Some(player), Some(enemy)) => check_collision(player, enemy),
            _ => false,
        };
        if hit {
            let outcome = world.resolve(id);
            report.collisions.push((id, outcome));
        }
    }

    if world.state.is_over() {
        return report;
    }

    if world.second_timer.tick() {
        world.state.elapsed_time += 1;
        report.second_elapsed = true;
    }
    if world.spawn_timer.tick() {
        let level = world.state.level;
        let enemy = spawn_enemy(&mut world.rng, &mut world.store, level, &world.config);
        report.spawned = Some(enemy.id);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyEntity, Shape};
    use glam::Vec2;

    fn world() -> World {
        World::new(GameConfig::default(), 12345)
    }

    /// Enemy sitting on top of the player, not moving
    fn park_enemy(world: &mut World, sides: u32) -> EnemyId {
        let center = world.store.player().unwrap().center();
        let id = world.store.next_enemy_id();
        world.store.add_enemy(EnemyEntity {
            id,
            shape: Shape(sides),
            size: 30.0,
            position: center - Vec2::splat(15.0),
            velocity: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
        });
        id
    }

    #[test]
    fn test_spawn_and_seconds_cadence() {
        let mut world = world();
        let input = TickInput::default();

        for _ in 0..49 {
            let report = tick(&mut world, &input);
            assert!(report.spawned.is_none());
            assert!(!report.second_elapsed);
        }
        let report = tick(&mut world, &input);
        assert!(report.spawned.is_some());
        assert!(report.second_elapsed);
        assert_eq!(world.state.elapsed_time, 1);
        assert_eq!(world.state.time_ticks, 50);
    }

    #[test]
    fn test_collision_uses_moved_positions() {
        let mut world = world();
        let center = world.store.player().unwrap().center();
        let id = world.store.next_enemy_id();
        // Boxes apart now, centers 15 apart after one step (radii 5 + 15)
        world.store.add_enemy(EnemyEntity {
            id,
            shape: Shape(1),
            size: 30.0,
            position: Vec2::new(center.x + 10.0, center.y - 15.0),
            velocity: Vec2::new(-10.0, 0.0),
            rotation: 0.0,
            spin: 0.0,
        });

        let report = tick(&mut world, &TickInput::default());
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(world.state.eaten_count, 1);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut world = world();
        park_enemy(&mut world, 0);
        let survivor = park_enemy(&mut world, 1);

        let report = tick(&mut world, &TickInput::default());
        assert!(report.game_over());
        // Contacts after the lethal one are not resolved
        assert_eq!(report.collisions.len(), 1);
        assert!(world.store.enemy(survivor).is_some());

        let frozen = world.state.clone();
        for _ in 0..200 {
            assert_eq!(tick(&mut world, &TickInput::default()), TickReport::default());
        }
        assert_eq!(world.state, frozen);
        assert_eq!(world.state.elapsed_time, 0);
    }

    #[test]
    fn test_enemy_exits_without_scoring() {
        let mut world = world();
        let threshold = world.escape_threshold();
        let center = world.config.play_area.center();
        let id = world.store.next_enemy_id();
        world.store.add_enemy(EnemyEntity {
            id,
            shape: Shape(1),
            size: 30.0,
            position: Vec2::new(center.x + threshold - 0.5, 0.0),
            velocity: Vec2::new(1.0, 0.0),
            rotation: 0.0,
            spin: 0.0,
        });

        let report = tick(&mut world, &TickInput::default());
        assert_eq!(report.escaped, vec![id]);
        assert!(world.store.enemy(id).is_none());
        assert_eq!(world.state, SessionState { time_ticks: 1, ..Default::default() });
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(GameConfig::default(), 99999);
        let mut b = World::new(GameConfig::default(), 99999);
        let input = TickInput::default();

        for _ in 0..500 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.state, b.state);
        assert_eq!(a.store.enemy_ids(), b.store.enemy_ids());
        for (x, y) in a.store.list_enemies().iter().zip(b.store.list_enemies()) {
            assert_eq!(x.position, y.position);
        }
    }
}
