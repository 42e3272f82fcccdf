//! Action domain.
//!
//! Every state change of a running game is modelled as an action that runs
//! through the same three-phase pipeline in [`crate::engine::GameEngine`]:
//!
//! - `start`: place both players and the target ([`StartAction`])
//! - `movement`: one orthogonal step by a player, with catch resolution
//!   ([`MoveAction`])
//! - `jump`: timer-driven relocation of the target ([`TargetJumpAction`])

pub mod jump;
pub mod movement;
pub mod start;

pub use jump::{JumpError, TargetJumpAction};
pub use movement::{CardinalDirection, MoveAction, MoveError, MoveReport};
pub use start::{StartAction, StartError};

use crate::config::GameConfig;
use crate::sampler::RandomSource;
use crate::state::GameState;

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply<R>(
        &self,
        state: &mut GameState,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self::Result, Self::Error>
    where
        R: RandomSource + ?Sized;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}
