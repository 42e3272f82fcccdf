//! Event payloads published by the runtime.

use serde::{Deserialize, Serialize};

use game_core::{Player, PlayerId, Position, Score, Target};

/// Why the target changed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelocationCause {
    /// Follow-up jump after a committed player move.
    Move,
    /// Periodic jump driven by the scheduler.
    Timer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Players and target were placed and the jump timer armed.
    Started {
        player1: Player,
        player2: Player,
        target: Target,
    },

    PlayerMoved {
        player: PlayerId,
        from: Position,
        to: Position,
    },

    /// A player stepped onto the target. `points` is the new total.
    TargetCaught { player: PlayerId, points: u32 },

    TargetRelocated {
        from: Position,
        to: Position,
        cause: RelocationCause,
    },

    /// Game reached its terminal state. `winner` is `None` after `stop()`.
    Finished {
        winner: Option<PlayerId>,
        score: Score,
    },
}
