//! Game events for presentation layers.
//!
//! The runtime publishes every observable state change so a UI can react
//! instead of polling the query surface.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{GameEvent, RelocationCause};
