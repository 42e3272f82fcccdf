use std::fmt;

/// Identifier of one of the two competing players.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum PlayerId {
    #[strum(serialize = "1")]
    One,
    #[strum(serialize = "2")]
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Numeric id as exposed to presentation layers (1 or 2).
    pub const fn as_u8(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// The opposing player.
    pub const fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        id.as_u8()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidPlayerId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(InvalidPlayerId(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("player id must be 1 or 2, got {0}")]
pub struct InvalidPlayerId(pub u8);

/// Discrete grid position expressed in 1-indexed cell coordinates.
///
/// `(0, 0)` lies outside every playable grid and is used as the target's
/// resting place once a game has been won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const SENTINEL: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by the given delta, or `None` if a
    /// coordinate would overflow.
    #[must_use]
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
