//! Unified error types surfaced by the runtime API.
//!
//! Wraps settings validation, engine failures and scheduler setup so clients
//! can bubble them up with consistent context. Illegal moves and repeated
//! lifecycle calls are not errors and never show up here.
use thiserror::Error;

use game_core::{ConfigError, ExecuteError, GameStatus};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("failed to parse settings")]
    ParseSettings(#[source] serde_json::Error),

    #[error("settings can only change while the game is pending (status: {status})")]
    SettingsLocked { status: GameStatus },

    #[error("default scheduler requires a tokio runtime")]
    NoTokioRuntime(#[source] tokio::runtime::TryCurrentError),
}
