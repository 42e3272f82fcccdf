use super::{PlayerId, Position};

/// One of the two competitors on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub position: Position,
}

impl Player {
    pub fn new(id: PlayerId, position: Position) -> Self {
        Self { id, position }
    }
}

/// The roaming collectible.
///
/// A target is never moved in place: every relocation installs a fresh value,
/// so holding on to an old copy preserves the previous position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub position: Position,
}

impl Target {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Target parked outside the grid after the game has been won.
    pub fn sentinel() -> Self {
        Self::new(Position::SENTINEL)
    }

    pub fn is_sentinel(&self) -> bool {
        self.position == Position::SENTINEL
    }
}
