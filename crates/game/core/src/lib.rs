//! Deterministic rules of the two-player grid chase.
//!
//! `game-core` defines the canonical rules (placement, movement, catching,
//! scoring, winning and target jumps) and exposes pure APIs free of clocks
//! and threads. All state mutation flows through [`engine::GameEngine`]; the
//! `runtime` crate adds the jump timer and locking on top.
pub mod action;
pub mod config;
pub mod engine;
pub mod sampler;
pub mod state;

pub use action::{
    ActionTransition, CardinalDirection, JumpError, MoveAction, MoveError, MoveReport,
    StartAction, StartError, TargetJumpAction,
};
pub use config::{ConfigError, GameConfig, GridSize};
pub use engine::{ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError};
pub use sampler::{PositionSampler, RandomSource, SampleError};
pub use state::{
    GameState, GameStatus, InvalidPlayerId, Player, PlayerId, Position, Score, Target,
};
