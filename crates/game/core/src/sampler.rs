//! Uniform placement of entities on free grid cells.
//!
//! [`PositionSampler`] draws both coordinates independently from a
//! [`RandomSource`] and rejects draws that land on an excluded cell. The loop
//! is bounded: a full exclusion set is reported up front, and once the retry
//! budget is spent the sampler picks uniformly among the remaining free cells.
use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::state::Position;

/// Source of uniformly distributed integers.
pub trait RandomSource: Send {
    /// Returns an integer drawn uniformly from `[1, max]`. `max` is never zero.
    fn roll(&mut self, max: u32) -> u32;
}

impl RandomSource for StdRng {
    fn roll(&mut self, max: u32) -> u32 {
        self.random_range(1..=max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll(&mut self, max: u32) -> u32 {
        (**self).roll(max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("exclusion set covers all {cells} cells of the grid")]
    GridExhausted { cells: u64 },
}

/// Rejection sampler over the cells of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSampler {
    grid: GridSize,
}

impl PositionSampler {
    /// Rejected draws allowed before falling back to enumerating free cells.
    pub const MAX_ATTEMPTS: usize = 1024;

    pub fn new(grid: GridSize) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Draws a cell that is not contained in `exclude`.
    ///
    /// Excluded positions outside the grid (such as the sentinel) are ignored.
    pub fn sample<R>(&self, rng: &mut R, exclude: &[Position]) -> Result<Position, SampleError>
    where
        R: RandomSource + ?Sized,
    {
        let cells = self.grid.cells();
        let blocked: HashSet<Position> = exclude
            .iter()
            .copied()
            .filter(|position| self.grid.contains(*position))
            .collect();

        if cells == 0 || blocked.len() as u64 >= cells {
            return Err(SampleError::GridExhausted { cells });
        }

        for _ in 0..Self::MAX_ATTEMPTS {
            let candidate = self.draw(rng);
            if !blocked.contains(&candidate) {
                return Ok(candidate);
            }
        }

        let free: Vec<Position> = self
            .cells()
            .filter(|position| !blocked.contains(position))
            .collect();
        let index = rng.roll(free.len() as u32) as usize - 1;
        Ok(free[index])
    }

    fn draw<R>(&self, rng: &mut R) -> Position
    where
        R: RandomSource + ?Sized,
    {
        let x = rng.roll(self.grid.columns);
        let y = rng.roll(self.grid.rows);
        Position::new(x as i32, y as i32)
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (1..=self.grid.rows).flat_map(move |y| {
            (1..=self.grid.columns).map(move |x| Position::new(x as i32, y as i32))
        })
    }
}
