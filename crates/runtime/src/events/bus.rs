//! Broadcast event bus.

use tokio::sync::broadcast;

use super::types::GameEvent;

/// Fan-out channel for [`GameEvent`]s.
///
/// Publishing is best-effort and never blocks; slow subscribers observe
/// `RecvError::Lagged` instead of stalling the game.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: GameEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for game event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
