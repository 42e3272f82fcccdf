use std::fmt;

use super::PlayerId;

/// Points accumulated by each player.
///
/// Starts at zero for both players and only ever grows during a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    points: [u32; 2],
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, player: PlayerId) -> u32 {
        self.points[player.index()]
    }

    /// Adds one point for `player` and returns the new total.
    pub(crate) fn award(&mut self, player: PlayerId) -> u32 {
        let slot = &mut self.points[player.index()];
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Iterates `(player, points)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        PlayerId::ALL.into_iter().map(|id| (id, self.points(id)))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.points(PlayerId::One),
            self.points(PlayerId::Two)
        )
    }
}
