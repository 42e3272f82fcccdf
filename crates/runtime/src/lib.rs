//! Runtime orchestration for the two-player grid chase.
//!
//! This crate wraps the pure rules from `game-core` with the pieces a live
//! game needs: a session lock, a periodic target jump, randomness, and an
//! event stream. Consumers embed [`Runtime`] to start and stop the game,
//! move players, query state, and subscribe to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`config`] loads settings from the environment or JSON
//! - [`events`] provides the broadcast event bus
//! - [`scheduler`] abstracts the jump timer so tests can drive it by hand
//! - `workers` keeps the timer-driven jump internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod runtime;
pub mod scheduler;

mod workers;

pub use api::{Result, RuntimeError};
pub use config::RuntimeConfig;
pub use events::{EventBus, GameEvent, RelocationCause};
pub use runtime::{Runtime, RuntimeBuilder};
pub use scheduler::{ManualScheduler, PeriodicScheduler, Task, TaskHandle, TokioScheduler};
