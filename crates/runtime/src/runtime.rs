//! High-level runtime orchestrator.
//!
//! The runtime owns the game session, arms the target jump timer, and
//! exposes a synchronous API for presentation layers. Every entry point
//! (player moves, timer ticks, start/stop) runs under one session lock, so
//! a move and a jump never interleave.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use game_core::{
    CardinalDirection, GameConfig, GameEngine, GameState, GameStatus, MoveAction, MoveReport,
    Player, PlayerId, RandomSource, Score, Target,
};

use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{EventBus, GameEvent, RelocationCause};
use crate::scheduler::{PeriodicScheduler, TaskHandle, TokioScheduler};
use crate::workers::TargetJumpWorker;

/// Mutable game session guarded by the runtime lock.
pub(crate) struct Session {
    pub(crate) config: GameConfig,
    pub(crate) state: GameState,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) jump_task: Option<TaskHandle>,
}

/// Locks the session, recovering the guard if a previous holder panicked.
///
/// The engine restores its snapshot before returning an error, so the state
/// behind a poisoned lock is still consistent.
pub(crate) fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Main runtime that orchestrates a single game.
pub struct Runtime {
    session: Arc<Mutex<Session>>,
    scheduler: Arc<dyn PeriodicScheduler>,
    events: EventBus,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Places both players and the target, then arms the jump timer.
    ///
    /// Calling this on a game that is already running or finished does
    /// nothing.
    pub fn start(&self) -> Result<()> {
        let mut guard = self.lock();
        let session = &mut *guard;

        if !session.state.status().is_pending() {
            debug!(status = %session.state.status(), "start ignored");
            return Ok(());
        }

        GameEngine::new(&mut session.state, &session.config).start(session.rng.as_mut())?;

        let worker = TargetJumpWorker::new(Arc::downgrade(&self.session), self.events.clone());
        let handle = self
            .scheduler
            .schedule(session.config.jump_interval(), worker.into_task());
        session.jump_task = Some(handle);

        let (Some(player1), Some(player2), Some(target)) = (
            session.state.player(PlayerId::One),
            session.state.player(PlayerId::Two),
            session.state.target(),
        ) else {
            return Ok(());
        };

        info!(
            player1 = %player1.position,
            player2 = %player2.position,
            target = %target.position,
            interval_ms = session.config.jump_interval_ms,
            "game started"
        );
        self.events.publish(GameEvent::Started {
            player1,
            player2,
            target,
        });

        Ok(())
    }

    /// Finishes the game without a winner and cancels the jump timer.
    ///
    /// Safe to call any number of times, including before `start`.
    pub fn stop(&self) {
        let mut guard = self.lock();
        let session = &mut *guard;

        let finished = GameEngine::new(&mut session.state, &session.config).finish();
        if let Some(handle) = session.jump_task.take() {
            self.scheduler.cancel(handle);
        }

        if finished {
            info!(score = %session.state.score(), "game stopped");
            self.events.publish(GameEvent::Finished {
                winner: None,
                score: session.state.score(),
            });
        }
    }

    /// Moves `player` one cell in `direction`.
    ///
    /// Returns `None` when the move is refused (wall, other player, or a game
    /// that is not running). A refused move leaves the game untouched.
    pub fn move_player(
        &self,
        player: PlayerId,
        direction: CardinalDirection,
    ) -> Option<MoveReport> {
        let mut guard = self.lock();
        let session = &mut *guard;

        let action = MoveAction::new(player, direction);
        let report = match GameEngine::new(&mut session.state, &session.config)
            .execute_move(&action, session.rng.as_mut())
        {
            Ok(report) => report,
            Err(err) if err.is_rejection() => {
                debug!(%player, %direction, %err, "move rejected");
                return None;
            }
            Err(err) => {
                warn!(%player, %direction, %err, "move failed");
                return None;
            }
        };

        debug!(%player, from = %report.from, to = %report.to, "player moved");
        self.events.publish(GameEvent::PlayerMoved {
            player,
            from: report.from,
            to: report.to,
        });

        if report.caught {
            info!(%player, points = report.points, "target caught");
            self.events.publish(GameEvent::TargetCaught {
                player,
                points: report.points,
            });
        }

        if report.won {
            if let Some(handle) = session.jump_task.take() {
                self.scheduler.cancel(handle);
            }
            info!(winner = %player, score = %session.state.score(), "game won");
            self.events.publish(GameEvent::Finished {
                winner: Some(player),
                score: session.state.score(),
            });
        } else {
            self.events.publish(GameEvent::TargetRelocated {
                from: report.previous_target.position,
                to: report.target.position,
                cause: RelocationCause::Move,
            });
        }

        Some(report)
    }

    pub fn move_player1_up(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::One, CardinalDirection::Up)
    }

    pub fn move_player1_down(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::One, CardinalDirection::Down)
    }

    pub fn move_player1_left(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::One, CardinalDirection::Left)
    }

    pub fn move_player1_right(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::One, CardinalDirection::Right)
    }

    pub fn move_player2_up(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::Two, CardinalDirection::Up)
    }

    pub fn move_player2_down(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::Two, CardinalDirection::Down)
    }

    pub fn move_player2_left(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::Two, CardinalDirection::Left)
    }

    pub fn move_player2_right(&self) -> Option<MoveReport> {
        self.move_player(PlayerId::Two, CardinalDirection::Right)
    }

    pub fn status(&self) -> GameStatus {
        self.lock().state.status()
    }

    pub fn player1(&self) -> Option<Player> {
        self.lock().state.player(PlayerId::One)
    }

    pub fn player2(&self) -> Option<Player> {
        self.lock().state.player(PlayerId::Two)
    }

    pub fn target(&self) -> Option<Target> {
        self.lock().state.target()
    }

    pub fn score(&self) -> Score {
        self.lock().state.score()
    }

    /// Current game settings.
    pub fn settings(&self) -> GameConfig {
        self.lock().config
    }

    /// Consistent copy of the whole game state.
    pub fn state(&self) -> GameState {
        self.lock().state.clone()
    }

    /// Replaces the game settings. Only allowed before the game starts.
    pub fn set_settings(&self, config: GameConfig) -> Result<()> {
        config.validate()?;

        let mut guard = self.lock();
        let status = guard.state.status();
        if !status.is_pending() {
            return Err(RuntimeError::SettingsLocked { status });
        }

        debug!(?config, "settings updated");
        guard.config = config;
        Ok(())
    }

    /// Subscribe to game events
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock_session(&self.session)
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(handle) = self.lock().jump_task.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    scheduler: Option<Arc<dyn PeriodicScheduler>>,
    rng: Option<Box<dyn RandomSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            scheduler: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game settings
    pub fn game_config(mut self, game: GameConfig) -> Self {
        self.config.game = game;
        self
    }

    /// Set the timer used for target jumps.
    ///
    /// Defaults to a [`TokioScheduler`] on the ambient tokio runtime.
    pub fn scheduler(mut self, scheduler: impl PeriodicScheduler + 'static) -> Self {
        self.scheduler = Some(Arc::new(scheduler));
        self
    }

    /// Set the source of randomness for placement and jumps.
    pub fn random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Use a deterministic generator seeded with `seed`.
    pub fn seed(self, seed: u64) -> Self {
        self.random_source(StdRng::seed_from_u64(seed))
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        self.config.game.validate()?;

        let scheduler = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::current().map_err(RuntimeError::NoTokioRuntime)?),
        };
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(StdRng::from_os_rng()));

        let session = Session {
            config: self.config.game,
            state: GameState::new(),
            rng,
            jump_task: None,
        };

        Ok(Runtime {
            session: Arc::new(Mutex::new(session)),
            scheduler,
            events: EventBus::with_capacity(self.config.event_buffer_size),
        })
    }
}
