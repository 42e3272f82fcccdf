//! Runtime configuration structures and loaders.
use std::env;

use game_core::GameConfig;

use crate::api::{Result, RuntimeError};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GRID_COLUMNS` - Grid width in cells (default: 3)
    /// - `GRID_ROWS` - Grid height in cells (default: 5)
    /// - `JUMP_INTERVAL_MS` - Target jump period (default: 2000)
    /// - `POINTS_TO_WIN` - Catches needed to win (default: 10)
    /// - `EVENT_BUFFER_SIZE` - Event channel capacity (default: 100)
    ///
    /// Unparsable values are ignored. Call [`GameConfig::validate`] (or
    /// build a runtime) to reject zeros.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(columns) = read_env::<u32>("GRID_COLUMNS") {
            config.game.grid_size.columns = columns;
        }
        if let Some(rows) = read_env::<u32>("GRID_ROWS") {
            config.game.grid_size.rows = rows;
        }
        if let Some(interval) = read_env::<u64>("JUMP_INTERVAL_MS") {
            config.game.jump_interval_ms = interval;
        }
        if let Some(points) = read_env::<u32>("POINTS_TO_WIN") {
            config.game.points_to_win = points;
        }
        if let Some(capacity) = read_env::<usize>("EVENT_BUFFER_SIZE") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }

    /// Parses game settings in the
    /// `{"gridSize": {...}, "googleJumpIntervalMs", "pointsToWin"}` shape.
    ///
    /// Missing fields take their defaults; the result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let game: GameConfig = serde_json::from_str(json).map_err(RuntimeError::ParseSettings)?;
        game.validate()?;
        Ok(Self::new(game))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
