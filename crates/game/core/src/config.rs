//! Game settings and their validation.
use std::time::Duration;

use crate::state::Position;

/// Dimensions of the playing field in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells on the grid.
    pub const fn cells(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Returns true if `position` lies within `[1, columns] × [1, rows]`.
    pub fn contains(&self, position: Position) -> bool {
        (1..=self.columns as i64).contains(&(position.x as i64))
            && (1..=self.rows as i64).contains(&(position.y as i64))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_COLUMNS, GameConfig::DEFAULT_ROWS)
    }
}

/// Configuration rejected by [`GameConfig::validate`] or by the sampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one column")]
    ZeroColumns,

    #[error("grid must have at least one row")]
    ZeroRows,

    #[error("target jump interval must be positive")]
    ZeroJumpInterval,

    #[error("points to win must be positive")]
    ZeroPointsToWin,

    #[error("grid has {cells} cells but two players and a target need at least 3")]
    GridTooSmall { cells: u64 },

    #[error("grid {columns}x{rows} exceeds the addressable {max} cells per side")]
    GridTooLarge { columns: u32, rows: u32, max: u32 },
}

/// Tunable parameters of a game.
///
/// With the `serde` feature the wire shape is
/// `{"gridSize": {"columns", "rows"}, "googleJumpIntervalMs", "pointsToWin"}`
/// and every missing field falls back to its default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GameConfig {
    pub grid_size: GridSize,
    /// Period of the autonomous target jump, in milliseconds.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "googleJumpIntervalMs", alias = "googleJumpInterval")
    )]
    pub jump_interval_ms: u64,
    pub points_to_win: u32,
}

impl GameConfig {
    pub const DEFAULT_COLUMNS: u32 = 3;
    pub const DEFAULT_ROWS: u32 = 5;
    pub const DEFAULT_JUMP_INTERVAL_MS: u64 = 2000;
    pub const DEFAULT_POINTS_TO_WIN: u32 = 10;

    /// Smallest grid that can host both players and the target at once.
    pub const MIN_CELLS: u64 = 3;

    /// Largest column or row count; positions are signed 32-bit.
    pub const MAX_DIMENSION: u32 = i32::MAX as u32;

    pub const fn new() -> Self {
        Self {
            grid_size: GridSize::new(Self::DEFAULT_COLUMNS, Self::DEFAULT_ROWS),
            jump_interval_ms: Self::DEFAULT_JUMP_INTERVAL_MS,
            points_to_win: Self::DEFAULT_POINTS_TO_WIN,
        }
    }

    #[must_use]
    pub fn with_grid_size(mut self, columns: u32, rows: u32) -> Self {
        self.grid_size = GridSize::new(columns, rows);
        self
    }

    #[must_use]
    pub fn with_jump_interval_ms(mut self, jump_interval_ms: u64) -> Self {
        self.jump_interval_ms = jump_interval_ms;
        self
    }

    #[must_use]
    pub fn with_points_to_win(mut self, points_to_win: u32) -> Self {
        self.points_to_win = points_to_win;
        self
    }

    pub const fn jump_interval(&self) -> Duration {
        Duration::from_millis(self.jump_interval_ms)
    }

    /// Checks that every field is positive, the grid fits three entities, and
    /// every cell is addressable by a [`Position`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.grid_size.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.jump_interval_ms == 0 {
            return Err(ConfigError::ZeroJumpInterval);
        }
        if self.points_to_win == 0 {
            return Err(ConfigError::ZeroPointsToWin);
        }

        let GridSize { columns, rows } = self.grid_size;
        if columns > Self::MAX_DIMENSION || rows > Self::MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                columns,
                rows,
                max: Self::MAX_DIMENSION,
            });
        }

        let cells = self.grid_size.cells();
        if cells < Self::MIN_CELLS {
            return Err(ConfigError::GridTooSmall { cells });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, GridSize::new(3, 5));
        assert_eq!(config.jump_interval_ms, 2000);
        assert_eq!(config.points_to_win, 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_fields() {
        let base = GameConfig::default();
        assert_eq!(
            base.with_grid_size(0, 5).validate(),
            Err(ConfigError::ZeroColumns)
        );
        assert_eq!(
            base.with_grid_size(3, 0).validate(),
            Err(ConfigError::ZeroRows)
        );
        assert_eq!(
            base.with_jump_interval_ms(0).validate(),
            Err(ConfigError::ZeroJumpInterval)
        );
        assert_eq!(
            base.with_points_to_win(0).validate(),
            Err(ConfigError::ZeroPointsToWin)
        );
    }

    #[test]
    fn rejects_grid_without_room_for_three_entities() {
        let config = GameConfig::default().with_grid_size(2, 1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall { cells: 2 })
        );
        assert!(GameConfig::default().with_grid_size(3, 1).validate().is_ok());
    }

    #[test]
    fn rejects_grid_beyond_position_range() {
        let widest = GameConfig::default().with_grid_size(GameConfig::MAX_DIMENSION, 1);
        assert!(widest.validate().is_ok());

        assert_eq!(
            GameConfig::default().with_grid_size(u32::MAX, 1).validate(),
            Err(ConfigError::GridTooLarge {
                columns: u32::MAX,
                rows: 1,
                max: GameConfig::MAX_DIMENSION,
            })
        );
        assert!(matches!(
            GameConfig::default()
                .with_grid_size(3, GameConfig::MAX_DIMENSION + 1)
                .validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn grid_contains_is_one_indexed() {
        let grid = GridSize::new(3, 2);
        assert!(grid.contains(Position::new(1, 1)));
        assert!(grid.contains(Position::new(3, 2)));
        assert!(!grid.contains(Position::new(0, 1)));
        assert!(!grid.contains(Position::new(4, 1)));
        assert!(!grid.contains(Position::new(1, 3)));
        assert!(!grid.contains(Position::SENTINEL));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"gridSize": {"columns": 10}}"#).unwrap();
        assert_eq!(config.grid_size, GridSize::new(10, GameConfig::DEFAULT_ROWS));
        assert_eq!(config.jump_interval_ms, GameConfig::DEFAULT_JUMP_INTERVAL_MS);
        assert_eq!(config.points_to_win, GameConfig::DEFAULT_POINTS_TO_WIN);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn accepts_legacy_interval_key() {
        let config: GameConfig =
            serde_json::from_str(r#"{"googleJumpInterval": 100, "pointsToWin": 3}"#).unwrap();
        assert_eq!(config.jump_interval_ms, 100);
        assert_eq!(config.points_to_win, 3);
        assert_eq!(config.grid_size, GridSize::default());
    }
}
