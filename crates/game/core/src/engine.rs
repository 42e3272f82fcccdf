//! Lifecycle and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! drives each action through its transition phases and surfaces rich error
//! information to the runtime. A failed action leaves the state exactly as
//! it was before the call.

use crate::action::{
    ActionTransition, JumpError, MoveAction, MoveError, MoveReport, StartAction, StartError,
    TargetJumpAction,
};
use crate::config::GameConfig;
use crate::sampler::RandomSource;
use crate::state::{GameState, GameStatus, Target};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("start action failed: {0}")]
    Start(TransitionPhaseError<StartError>),

    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("target jump failed: {0}")]
    Jump(TransitionPhaseError<JumpError>),
}

impl ExecuteError {
    /// True when the rules refused the action without it being a fault:
    /// a repeated start, an illegal move, or a jump outside of play.
    pub fn is_rejection(&self) -> bool {
        match self {
            ExecuteError::Start(err) => err.error.is_redundant(),
            ExecuteError::Move(err) => err.error.is_rejection(),
            ExecuteError::Jump(err) => matches!(err.error, JumpError::GameNotActive { .. }),
        }
    }
}

type TransitionResult<T, E> = Result<T, TransitionPhaseError<E>>;

/// Game engine that applies lifecycle transitions and player actions.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state and settings.
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Places the players and the target and moves the game to `InProcess`.
    ///
    /// Only valid from `Pending`; later calls fail with
    /// [`StartError::NotPending`] and change nothing.
    pub fn start<R>(&mut self, rng: &mut R) -> Result<(), ExecuteError>
    where
        R: RandomSource + ?Sized,
    {
        self.execute(&StartAction, rng).map_err(ExecuteError::Start)
    }

    /// Moves a player one cell and resolves catch, score, win and the
    /// follow-up target jump.
    pub fn execute_move<R>(
        &mut self,
        action: &MoveAction,
        rng: &mut R,
    ) -> Result<MoveReport, ExecuteError>
    where
        R: RandomSource + ?Sized,
    {
        self.execute(action, rng).map_err(ExecuteError::Move)
    }

    /// Relocates the target on behalf of the jump timer.
    ///
    /// Returns the `(previous, current)` target.
    pub fn jump_target<R>(&mut self, rng: &mut R) -> Result<(Target, Target), ExecuteError>
    where
        R: RandomSource + ?Sized,
    {
        self.execute(&TargetJumpAction, rng)
            .map_err(ExecuteError::Jump)
    }

    /// Ends the game. Returns `false` if it had already finished.
    pub fn finish(&mut self) -> bool {
        if self.state.status.is_finished() {
            return false;
        }
        self.state.status = GameStatus::Finished;
        true
    }

    fn execute<T, R>(&mut self, transition: &T, rng: &mut R) -> TransitionResult<T::Result, T::Error>
    where
        T: ActionTransition,
        R: RandomSource + ?Sized,
    {
        let before = self.state.clone();

        let result = drive_transition(transition, self.state, self.config, rng);
        if result.is_err() {
            *self.state = before;
        }
        result
    }
}

#[inline]
fn drive_transition<T, R>(
    transition: &T,
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> TransitionResult<T::Result, T::Error>
where
    T: ActionTransition,
    R: RandomSource + ?Sized,
{
    transition
        .pre_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let output = transition
        .apply(state, config, rng)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(output)
}
