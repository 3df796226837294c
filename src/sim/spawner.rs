//! Enemy spawning
//!
//! Enemies appear on a circle around the play area and head for a random
//! point inside it. Higher levels roll more side classes and move faster.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyEntity, EnemyId, Shape};
use super::store::EntityStore;
use crate::consts::{ENEMY_BASE_SPEED, ENEMY_SPEED_PER_LEVEL, SIDE_ROLL_BONUS};
use crate::settings::GameConfig;

/// Enemy speed in units per tick for a level
pub fn enemy_speed(level: u32) -> f32 {
    ENEMY_BASE_SPEED + level as f32 * ENEMY_SPEED_PER_LEVEL
}

/// Roll a new enemy without inserting it
pub fn roll_enemy<R: Rng>(rng: &mut R, id: EnemyId, level: u32, config: &GameConfig) -> EnemyEntity {
    let area = &config.play_area;

    let sides = rng.random_range(0..level + SIDE_ROLL_BONUS);
    let size = rng.random_range(config.enemy_min_size..=config.enemy_max_size);

    let angle = rng.random_range(0.0..TAU);
    let distance = area.spawn_distance(config.spawn_margin);
    let position = area.center() + Vec2::new(angle.cos(), angle.sin()) * distance;

    let target = Vec2::new(
        area.left + rng.random::<f32>() * area.width,
        area.top + rng.random::<f32>() * area.height,
    );
    let velocity = (target - position).normalize_or_zero() * enemy_speed(level);

    let spin = if config.enemy_spin_max > 0.0 {
        rng.random_range(-config.enemy_spin_max..config.enemy_spin_max)
    } else {
        0.0
    };

    EnemyEntity {
        id,
        shape: Shape(sides),
        size,
        position,
        velocity,
        rotation: 0.0,
        spin,
    }
}

/// Create an enemy for `level` and insert it into the store
pub fn spawn_enemy<R: Rng>(
    rng: &mut R,
    store: &mut EntityStore,
    level: u32,
    config: &GameConfig,
) -> EnemyEntity {
    let id = store.next_enemy_id();
    let enemy = roll_enemy(rng, id, level, config);
    log::debug!(
        "Spawned enemy {:?}: {} sides, size {:.1}",
        enemy.id,
        enemy.sides(),
        enemy.size
    );
    store.add_enemy(enemy.clone());
    enemy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawned_enemy_ranges() {
        let config = GameConfig::default();
        let area = config.play_area;
        let distance = area.spawn_distance(config.spawn_margin);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut store = EntityStore::new();

        for level in 1..6 {
            for _ in 0..50 {
                let enemy = spawn_enemy(&mut rng, &mut store, level, &config);
                assert!(enemy.sides() < level + 4);
                assert!((30.0..=70.0).contains(&enemy.size));
                assert!((-2.0..2.0).contains(&enemy.spin));

                let radius = (enemy.position - area.center()).length();
                assert!((radius - distance).abs() < 0.01);

                let speed = enemy.velocity.length();
                assert!((speed - enemy_speed(level)).abs() < 1e-4);
                // Heading inward
                assert!(enemy.velocity.dot(area.center() - enemy.position) > 0.0);
            }
        }
        assert_eq!(store.enemy_count(), 250);
    }

    #[test]
    fn test_level_one_rolls_all_low_classes() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = [false; 5];
        for i in 0..500 {
            let enemy = roll_enemy(&mut rng, EnemyId(i), 1, &config);
            seen[enemy.sides() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_speed_scales_with_level() {
        assert!((enemy_speed(1) - 1.2).abs() < 1e-6);
        assert!((enemy_speed(5) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_enemy() {
        let config = GameConfig::default();
        let a = roll_enemy(&mut Pcg32::seed_from_u64(42), EnemyId(1), 3, &config);
        let b = roll_enemy(&mut Pcg32::seed_from_u64(42), EnemyId(1), 3, &config);
        assert_eq!(a.shape, b.shape);
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}
