use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::sampler::{PositionSampler, RandomSource, SampleError};
use crate::state::{GameState, GameStatus, PlayerId, Position, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("players only move while the game is in process (status: {status})")]
    GameNotActive { status: GameStatus },

    #[error("moving {direction} from {from} leaves the grid")]
    OutOfBounds {
        from: Position,
        direction: CardinalDirection,
    },

    #[error("destination {destination} is occupied by the other player")]
    Occupied { destination: Position },

    #[error("could not relocate target: {0}")]
    Relocation(#[from] SampleError),

    #[error("occupancy desync: both players at {position}")]
    OccupancyDesync { position: Position },
}

impl MoveError {
    /// True for moves the rules silently refuse (walls, the other player,
    /// or a game that is not running).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            MoveError::GameNotActive { .. }
                | MoveError::OutOfBounds { .. }
                | MoveError::Occupied { .. }
        )
    }
}

/// Single-cell step direction. `Up` decreases `y`, `Down` increases it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardinalDirection {
    Up,
    Down,
    Left,
    Right,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::Up,
        CardinalDirection::Down,
        CardinalDirection::Left,
        CardinalDirection::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::Up => (0, -1),
            CardinalDirection::Down => (0, 1),
            CardinalDirection::Left => (-1, 0),
            CardinalDirection::Right => (1, 0),
        }
    }
}

/// What a committed move did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    pub player: PlayerId,
    pub from: Position,
    pub to: Position,
    /// True if the mover stepped onto the target.
    pub caught: bool,
    /// Mover's points after the move.
    pub points: u32,
    pub previous_target: Target,
    /// Target after the move: freshly sampled, or the sentinel on a win.
    pub target: Target,
    pub won: bool,
}

/// One orthogonal step by a player, followed by catch resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub player: PlayerId,
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(player: PlayerId, direction: CardinalDirection) -> Self {
        Self { player, direction }
    }

    /// Current cell of the mover and the in-bounds cell it steps to.
    fn step(
        &self,
        state: &GameState,
        config: &GameConfig,
    ) -> Result<(Position, Position), MoveError> {
        let not_active = MoveError::GameNotActive {
            status: state.status,
        };
        if !state.status.is_active() {
            return Err(not_active);
        }
        let from = state.player(self.player).ok_or(not_active)?.position;

        from.offset(self.direction.delta())
            .filter(|destination| config.grid_size.contains(*destination))
            .map(|destination| (from, destination))
            .ok_or(MoveError::OutOfBounds {
                from,
                direction: self.direction,
            })
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveReport;

    fn pre_validate(&self, state: &GameState, config: &GameConfig) -> Result<(), Self::Error> {
        let (_, destination) = self.step(state, config)?;

        let other = state.player(self.player.other());
        if other.is_some_and(|other| other.position == destination) {
            return Err(MoveError::Occupied { destination });
        }

        Ok(())
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
        let (from, destination) = self.step(state, config)?;
        let not_active = MoveError::GameNotActive {
            status: state.status,
        };
        let previous_target = state.target.ok_or(not_active)?;

        let mover = state.player_mut(self.player).ok_or(not_active)?;
        mover.position = destination;

        let caught = destination == previous_target.position;
        let points = if caught {
            state.score.award(self.player)
        } else {
            state.score.points(self.player)
        };

        let won = points >= config.points_to_win;
        let target = if won {
            state.status = GameStatus::Finished;
            Target::sentinel()
        } else {
            // The target jumps after every committed move, caught or not.
            let mut exclude = state.player_positions();
            if !caught {
                exclude.push(previous_target.position);
            }
            let next = PositionSampler::new(config.grid_size).sample(rng, &exclude)?;
            Target::new(next)
        };
        state.target = Some(target);

        Ok(MoveReport {
            player: self.player,
            from,
            to: destination,
            caught,
            points,
            previous_target,
            target,
            won,
        })
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        match (state.player(PlayerId::One), state.player(PlayerId::Two)) {
            (Some(first), Some(second)) if first.position == second.position => {
                Err(MoveError::OccupancyDesync {
                    position: first.position,
                })
            }
            _ => Ok(()),
        }
    }
}
