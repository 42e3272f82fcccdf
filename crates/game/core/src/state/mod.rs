//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the two players, the
//! target, the score table and the lifecycle status. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
pub mod types;

pub use types::{GameStatus, InvalidPlayerId, Player, PlayerId, Position, Score, Target};

/// Canonical snapshot of a single game.
///
/// Players and target only exist once the game has been started.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub(crate) status: GameStatus,
    pub(crate) players: Option<[Player; 2]>,
    pub(crate) target: Option<Target>,
    pub(crate) score: Score,
}

impl GameState {
    /// Creates a pending game with an empty score table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn player(&self, id: PlayerId) -> Option<Player> {
        self.players.map(|players| players[id.index()])
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }

    /// Cells currently held by the two players.
    pub fn player_positions(&self) -> Vec<Position> {
        self.players
            .iter()
            .flatten()
            .map(|player| player.position)
            .collect()
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players
            .as_mut()
            .map(|players| &mut players[id.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_state_has_no_entities() {
        let state = GameState::new();
        assert_eq!(state.status(), GameStatus::Pending);
        assert!(state.player(PlayerId::One).is_none());
        assert!(state.target().is_none());
        assert!(state.player_positions().is_empty());
        assert_eq!(state.score().iter().collect::<Vec<_>>(), [
            (PlayerId::One, 0),
            (PlayerId::Two, 0)
        ]);
    }

    #[test]
    fn status_uses_kebab_case_names() {
        assert_eq!(GameStatus::Pending.to_string(), "pending");
        assert_eq!(GameStatus::InProcess.to_string(), "in-process");
        assert_eq!(GameStatus::Finished.as_ref(), "finished");
        assert_eq!("In-Process".parse::<GameStatus>(), Ok(GameStatus::InProcess));
    }

    #[test]
    fn player_ids_round_trip_through_numbers() {
        for id in PlayerId::ALL {
            assert_eq!(PlayerId::try_from(id.as_u8()), Ok(id));
            assert_eq!(id.other().other(), id);
        }
        assert_eq!(PlayerId::One.to_string(), "1");
        assert_eq!(PlayerId::try_from(3), Err(InvalidPlayerId(3)));
    }

    #[test]
    fn score_awards_only_the_scorer() {
        let mut score = Score::new();
        assert_eq!(score.award(PlayerId::Two), 1);
        assert_eq!(score.award(PlayerId::Two), 2);
        assert_eq!(score.points(PlayerId::One), 0);
        assert_eq!(score.to_string(), "0:2");
    }

    #[test]
    fn positions_compare_by_value() {
        let origin = Position::new(2, 3);
        let copy = origin;
        assert_eq!(origin.offset((1, 0)), Some(Position::new(3, 3)));
        assert_eq!(Position::new(i32::MAX, 1).offset((1, 0)), None);
        assert_eq!(Position::new(1, i32::MIN).offset((0, -1)), None);
        assert_eq!(copy, origin);
        assert_eq!(origin.to_string(), "(2, 3)");
    }
}
