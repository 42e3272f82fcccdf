//! Shared helpers for runtime integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use game_core::{CardinalDirection, GameConfig, PlayerId, Position, RandomSource};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::{ManualScheduler, Runtime};
use tracing_subscriber::EnvFilter;

/// Routes runtime logs through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn settings(columns: u32, rows: u32, points_to_win: u32) -> GameConfig {
    GameConfig::default()
        .with_grid_size(columns, rows)
        .with_points_to_win(points_to_win)
}

/// Runtime on a manual clock with a fixed seed.
pub fn manual_runtime(config: GameConfig) -> (Runtime, ManualScheduler) {
    init_tracing();
    let scheduler = ManualScheduler::new();
    let runtime = Runtime::builder()
        .game_config(config)
        .scheduler(scheduler.clone())
        .seed(7)
        .build()
        .expect("valid settings");
    (runtime, scheduler)
}

/// Finds a player standing next to `cell` and the step that reaches it.
pub fn step_onto(runtime: &Runtime, cell: Position) -> Option<(PlayerId, CardinalDirection)> {
    PlayerId::ALL.into_iter().find_map(|id| {
        let player = runtime.state().player(id)?;
        CardinalDirection::ALL
            .into_iter()
            .find(|direction| player.position.offset(direction.delta()) == Some(cell))
            .map(|direction| (id, direction))
    })
}

/// Replays fixed rolls for the opening placements, then falls back to a
/// seeded generator for every later relocation.
pub struct ScriptedPlacement {
    rolls: VecDeque<u32>,
    rng: StdRng,
}

impl ScriptedPlacement {
    /// `cells` are player one, player two and the target, in that order.
    pub fn new(cells: [(u32, u32); 3], seed: u64) -> Self {
        Self {
            rolls: cells.into_iter().flat_map(|(x, y)| [x, y]).collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for ScriptedPlacement {
    fn roll(&mut self, max: u32) -> u32 {
        match self.rolls.pop_front() {
            Some(value) => value,
            None => self.rng.roll(max),
        }
    }
}
