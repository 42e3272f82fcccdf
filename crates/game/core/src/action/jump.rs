use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::sampler::{PositionSampler, RandomSource, SampleError};
use crate::state::{GameState, GameStatus, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JumpError {
    #[error("target only jumps while the game is in process (status: {status})")]
    GameNotActive { status: GameStatus },

    #[error("no free cell for the target: {0}")]
    Sample(#[from] SampleError),

    #[error("target landed on a player's cell")]
    LandedOnPlayer,
}

/// Timer-driven relocation of the target.
///
/// Excludes both players and the target's own cell, so every successful jump
/// lands somewhere new. Needs at least four cells; on smaller grids the jump
/// fails with [`JumpError::Sample`] and the target stays put.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetJumpAction;

impl ActionTransition for TargetJumpAction {
    type Error = JumpError;
    /// `(previous, current)` target.
    type Result = (Target, Target);

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if state.status.is_active() && state.target.is_some() {
            Ok(())
        } else {
            Err(JumpError::GameNotActive {
                status: state.status,
            })
        }
    }

    fn apply<R>(
        &self,
        state: &mut GameState,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self::Result, Self::Error>
    where
        R: RandomSource + ?Sized,
    {
        let previous = state.target.ok_or(JumpError::GameNotActive {
            status: state.status,
        })?;

        let mut exclude = state.player_positions();
        exclude.push(previous.position);

        let next = PositionSampler::new(config.grid_size).sample(rng, &exclude)?;
        let current = Target::new(next);
        state.target = Some(current);

        Ok((previous, current))
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        match state.target {
            Some(target) if state.player_positions().contains(&target.position) => {
                Err(JumpError::LandedOnPlayer)
            }
            _ => Ok(()),
        }
    }
}
