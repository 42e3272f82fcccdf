use crate::action::ActionTransition;
use crate::config::{ConfigError, GameConfig};
use crate::sampler::{PositionSampler, RandomSource, SampleError};
use crate::state::{GameState, GameStatus, Player, PlayerId, Position, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("game already left the pending state (status: {status})")]
    NotPending { status: GameStatus },

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),

    #[error("could not place entity: {0}")]
    Sample(#[from] SampleError),

    #[error("entities overlap or left the grid after placement")]
    PlacementDesync,
}

impl StartError {
    /// Repeated `start()` calls surface this; callers treat it as a no-op.
    pub fn is_redundant(&self) -> bool {
        matches!(self, StartError::NotPending { .. })
    }
}

/// Places both players and the target, then opens the game.
///
/// Placement order matters for the exclusion sets: player one anywhere,
/// player two anywhere but player one, the target on neither player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StartAction;

impl ActionTransition for StartAction {
    type Error = StartError;
    type Result = ();

    fn pre_validate(&self, state: &GameState, config: &GameConfig) -> Result<(), Self::Error> {
        if !state.status.is_pending() {
            return Err(StartError::NotPending {
                status: state.status,
            });
        }
        config.validate()?;
        Ok(())
    }

    fn apply<R>(
        &self,
        state: &mut GameState,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<(), Self::Error>
    where
        R: RandomSource + ?Sized,
    {
        let sampler = PositionSampler::new(config.grid_size);

        let first = sampler.sample(rng, &[])?;
        let second = sampler.sample(rng, &[first])?;
        let target = sampler.sample(rng, &[first, second])?;

        state.status = GameStatus::InProcess;
        state.players = Some([
            Player::new(PlayerId::One, first),
            Player::new(PlayerId::Two, second),
        ]);
        state.target = Some(Target::new(target));

        Ok(())
    }

    fn post_validate(&self, state: &GameState, config: &GameConfig) -> Result<(), Self::Error> {
        let (Some(players), Some(target)) = (state.players, state.target) else {
            return Err(StartError::PlacementDesync);
        };

        let cells: [Position; 3] = [players[0].position, players[1].position, target.position];
        let inside = cells.iter().all(|cell| config.grid_size.contains(*cell));
        let distinct = cells[0] != cells[1] && cells[0] != cells[2] && cells[1] != cells[2];

        if inside && distinct {
            Ok(())
        } else {
            Err(StartError::PlacementDesync)
        }
    }
}
