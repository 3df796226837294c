//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod clock;
pub mod collision;
pub mod movement;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use bounds::PlayArea;
pub use clock::{FrameClock, Ticker};
pub use collision::{Aabb, CollisionOutcome, DeathCause, check_collision, resolve_collision};
pub use movement::{Direction, InputState, PlayerIntent, advance_enemies, apply_player_intent};
pub use session::{GameOverHandler, GameSession};
pub use snapshot::{EnemyView, PlayerView, SessionSnapshot, Snapshot};
pub use spawner::{enemy_speed, roll_enemy, spawn_enemy};
pub use state::{EnemyEntity, EnemyId, GamePhase, PlayerEntity, SessionState, Shape};
pub use store::EntityStore;
pub use tick::{TickInput, TickReport, World, tick};
