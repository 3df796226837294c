//! Game session controller
//!
//! Owns one run: the world, the player's current intent, the frame clock and
//! the game-over notification. Everything the presentation layer touches
//! goes through here.

use super::clock::FrameClock;
use super::collision::CollisionOutcome;
use super::movement::PlayerIntent;
use super::snapshot::Snapshot;
use super::state::{EnemyId, SessionState};
use super::store::EntityStore;
use super::tick::{TickInput, TickReport, World, tick};
use crate::settings::{ConfigError, GameConfig};

/// Called once per run with the final snapshot
pub type GameOverHandler = Box<dyn FnMut(&Snapshot)>;

pub struct GameSession {
    world: World,
    seed: u64,
    intent: PlayerIntent,
    frame_clock: FrameClock,
    game_over_handlers: Vec<GameOverHandler>,
    game_over_fired: bool,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("seed", &self.seed)
            .field("state", &self.world.state)
            .field("enemies", &self.world.store.enemy_count())
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Validate `config` and start a run
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Start a run with the default config
    pub fn with_seed(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        log::info!("Starting session with seed {}", seed);
        Self {
            frame_clock: FrameClock::new(config.tick_secs(), config.max_substeps),
            world: World::new(config, seed),
            seed,
            intent: PlayerIntent::Idle,
            game_over_handlers: Vec::new(),
            game_over_fired: false,
        }
    }

    /// Restart with the same seed. Handlers stay registered and re-armed.
    pub fn reset(&mut self) {
        self.reset_with_seed(self.seed);
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        log::info!("Session reset with seed {}", seed);
        let config = self.world.config.clone();
        self.frame_clock = FrameClock::new(config.tick_secs(), config.max_substeps);
        self.world = World::new(config, seed);
        self.seed = seed;
        self.intent = PlayerIntent::Idle;
        self.game_over_fired = false;
    }

    /// Intent used by every following tick until replaced
    pub fn set_player_intent(&mut self, intent: PlayerIntent) {
        self.intent = intent;
    }

    pub fn intent(&self) -> PlayerIntent {
        self.intent
    }

    /// Register a game-over handler
    pub fn on_game_over(&mut self, handler: impl FnMut(&Snapshot) + 'static) {
        self.game_over_handlers.push(Box::new(handler));
    }

    /// Advance one fixed step
    pub fn tick(&mut self) -> TickReport {
        let input = TickInput {
            intent: self.intent,
        };
        let report = tick(&mut self.world, &input);
        self.notify_if_over();
        report
    }

    /// Feed a frame delta (seconds); runs as many fixed steps as fit
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let steps = self.frame_clock.advance(frame_dt);
        for _ in 0..steps {
            if self.is_over() {
                break;
            }
            self.tick();
        }
        steps
    }

    /// Resolve a contact directly (the tick does this on its own)
    pub fn resolve_collision(&mut self, id: EnemyId) -> CollisionOutcome {
        let outcome = self.world.resolve(id);
        self.notify_if_over();
        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world.state, &self.world.store)
    }

    pub fn state(&self) -> &SessionState {
        &self.world.state
    }

    pub fn store(&self) -> &EntityStore {
        &self.world.store
    }

    /// Direct entity access for scripted setups (tests, replays)
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.world.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.world.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_over(&self) -> bool {
        self.world.state.is_over()
    }

    fn notify_if_over(&mut self) {
        if !self.world.state.is_over() || self.game_over_fired {
            return;
        }
        self.game_over_fired = true;

        let snapshot = self.snapshot();
        let s = &snapshot.session;
        log::info!(
            "Final: score {}, eaten {}, sides {}, {}s",
            s.score,
            s.eaten_count,
            s.player_sides,
            s.elapsed_time
        );
        for handler in &mut self.game_over_handlers {
            handler(&snapshot);
        }
    }
}
