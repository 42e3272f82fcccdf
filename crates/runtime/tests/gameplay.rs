//! End-to-end game sessions driven through the public runtime API.

mod common;

use std::collections::HashSet;
use std::time::Duration;

use game_core::{CardinalDirection, GameConfig, GameStatus, MoveReport, PlayerId, Position};
use runtime::{GameEvent, ManualScheduler, RelocationCause, Runtime, RuntimeError};

use common::{ScriptedPlacement, init_tracing, manual_runtime, settings, step_onto};

fn occupied_cells(runtime: &Runtime) -> HashSet<Position> {
    let state = runtime.state();
    let mut cells: HashSet<Position> = state.player_positions().into_iter().collect();
    if let Some(target) = state.target() {
        cells.insert(target.position);
    }
    cells
}

#[test]
fn start_places_three_distinct_cells() {
    let (runtime, scheduler) = manual_runtime(GameConfig::default());
    assert_eq!(runtime.status(), GameStatus::Pending);
    assert!(runtime.player1().is_none());

    runtime.start().unwrap();

    assert_eq!(runtime.status(), GameStatus::InProcess);
    assert_eq!(occupied_cells(&runtime).len(), 3);
    for cell in occupied_cells(&runtime) {
        assert!(runtime.settings().grid_size.contains(cell));
    }
    assert_eq!(scheduler.active_tasks(), 1);
}

#[test]
fn repeated_start_is_ignored() {
    let (runtime, scheduler) = manual_runtime(GameConfig::default());
    runtime.start().unwrap();
    let before = runtime.state();

    runtime.start().unwrap();

    assert_eq!(runtime.state(), before);
    assert_eq!(scheduler.active_tasks(), 1);
}

#[test]
fn catching_the_last_point_wins_and_stops_the_timer() {
    let (runtime, scheduler) = manual_runtime(settings(3, 1, 1));
    runtime.start().unwrap();

    let target = runtime.target().unwrap().position;
    let (player, direction) = step_onto(&runtime, target).expect("3x1 grid keeps a player adjacent");
    let report = runtime.move_player(player, direction).unwrap();

    assert!(report.caught);
    assert!(report.won);
    assert_eq!(runtime.status(), GameStatus::Finished);
    assert_eq!(runtime.score().points(player), 1);
    assert_eq!(runtime.score().points(player.other()), 0);
    assert!(runtime.target().unwrap().is_sentinel());
    assert_eq!(scheduler.active_tasks(), 0);

    let finished = runtime.state();
    scheduler.advance(Duration::from_secs(60));
    assert_eq!(runtime.state(), finished);
}

#[test]
fn catch_without_win_moves_target_to_free_cell() {
    let (runtime, _scheduler) = manual_runtime(settings(3, 1, 5));
    runtime.start().unwrap();

    let target = runtime.target().unwrap().position;
    let (player, direction) = step_onto(&runtime, target).unwrap();
    let report = runtime.move_player(player, direction).unwrap();

    assert!(report.caught);
    assert!(!report.won);
    assert_eq!(report.points, 1);
    // Only the cell the mover vacated is free on a full 3x1 grid.
    assert_eq!(report.target.position, report.from);
    assert_eq!(runtime.status(), GameStatus::InProcess);
    assert_eq!(occupied_cells(&runtime).len(), 3);
}

#[test]
fn illegal_moves_change_nothing() {
    let (runtime, _scheduler) = manual_runtime(settings(3, 1, 5));
    assert!(runtime.move_player1_right().is_none(), "moves before start");

    runtime.start().unwrap();
    let before = runtime.state();

    // A single row has no vertical neighbours.
    assert!(runtime.move_player1_up().is_none());
    assert!(runtime.move_player2_down().is_none());
    assert_eq!(runtime.state(), before);

    // Stepping onto the other player is refused.
    let other = runtime.player2().unwrap().position;
    if let Some((PlayerId::One, direction)) = step_onto(&runtime, other) {
        assert!(runtime.move_player(PlayerId::One, direction).is_none());
        assert_eq!(runtime.state(), before);
    }

    // Leaving the grid through a side wall is refused.
    let player1 = runtime.player1().unwrap().position;
    let outward = if player1.x == 1 {
        CardinalDirection::Left
    } else {
        CardinalDirection::Right
    };
    if player1.x == 1 || player1.x == 3 {
        assert!(runtime.move_player(PlayerId::One, outward).is_none());
        assert_eq!(runtime.state(), before);
    }
}

#[test]
fn stop_is_idempotent() {
    let (runtime, scheduler) = manual_runtime(GameConfig::default());
    let mut events = runtime.subscribe();
    runtime.start().unwrap();
    let _started = events.try_recv().unwrap();

    runtime.stop();
    runtime.stop();

    assert_eq!(runtime.status(), GameStatus::Finished);
    assert_eq!(scheduler.active_tasks(), 0);
    assert!(matches!(
        events.try_recv(),
        Ok(GameEvent::Finished { winner: None, .. })
    ));
    assert!(events.try_recv().is_err(), "second stop publishes nothing");

    assert!(runtime.move_player2_left().is_none());
    runtime.start().unwrap();
    assert_eq!(runtime.status(), GameStatus::Finished);
}

#[test]
fn events_follow_each_committed_change() {
    let (runtime, _scheduler) = manual_runtime(settings(3, 1, 5));
    let mut events = runtime.subscribe();

    runtime.start().unwrap();
    let Ok(GameEvent::Started {
        player1,
        player2,
        target,
    }) = events.try_recv()
    else {
        panic!("expected start event");
    };
    assert_eq!(Some(player1), runtime.player1());
    assert_eq!(Some(player2), runtime.player2());
    assert_eq!(Some(target), runtime.target());

    let (player, direction) = step_onto(&runtime, target.position).unwrap();
    let report = runtime.move_player(player, direction).unwrap();

    assert_eq!(events.try_recv().unwrap(), GameEvent::PlayerMoved {
        player,
        from: report.from,
        to: report.to,
    });
    assert_eq!(events.try_recv().unwrap(), GameEvent::TargetCaught {
        player,
        points: 1,
    });
    assert_eq!(events.try_recv().unwrap(), GameEvent::TargetRelocated {
        from: target.position,
        to: report.target.position,
        cause: RelocationCause::Move,
    });
    assert!(events.try_recv().is_err());
}

#[test]
fn settings_lock_once_the_game_starts() {
    let (runtime, _scheduler) = manual_runtime(GameConfig::default());

    runtime.set_settings(settings(4, 4, 2)).unwrap();
    assert_eq!(runtime.settings(), settings(4, 4, 2));

    let err = runtime.set_settings(settings(0, 4, 2)).unwrap_err();
    assert!(matches!(err, RuntimeError::Config(_)));

    runtime.start().unwrap();
    let err = runtime.set_settings(GameConfig::default()).unwrap_err();
    assert!(matches!(err, RuntimeError::SettingsLocked {
        status: GameStatus::InProcess
    }));
    assert_eq!(runtime.settings(), settings(4, 4, 2));
}

#[test]
fn builder_rejects_invalid_settings() {
    let err = Runtime::builder()
        .game_config(settings(1, 2, 1))
        .scheduler(ManualScheduler::new())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::Config(_)));
}

#[test]
fn default_scheduler_needs_a_tokio_runtime() {
    let err = Runtime::builder().build().err().unwrap();
    assert!(matches!(err, RuntimeError::NoTokioRuntime(_)));
}

#[test]
fn dropping_the_runtime_cancels_the_timer() {
    let (runtime, scheduler) = manual_runtime(GameConfig::default());
    runtime.start().unwrap();
    assert_eq!(scheduler.active_tasks(), 1);

    drop(runtime);

    assert_eq!(scheduler.active_tasks(), 0);
    scheduler.advance(Duration::from_secs(10));
}

#[test]
fn every_move_binding_steps_one_cell() {
    init_tracing();
    let scheduler = ManualScheduler::new();
    // Player one circles around (2,2) and player two around (4,4); their
    // paths never meet, so every call below is legal.
    let runtime = Runtime::builder()
        .game_config(settings(5, 5, 100))
        .scheduler(scheduler)
        .random_source(ScriptedPlacement::new([(2, 2), (4, 4), (5, 1)], 21))
        .build()
        .unwrap();
    runtime.start().unwrap();

    let bindings: [(fn(&Runtime) -> Option<MoveReport>, PlayerId, Position); 8] = [
        (Runtime::move_player1_up, PlayerId::One, Position::new(2, 1)),
        (Runtime::move_player1_down, PlayerId::One, Position::new(2, 2)),
        (Runtime::move_player1_left, PlayerId::One, Position::new(1, 2)),
        (Runtime::move_player1_right, PlayerId::One, Position::new(2, 2)),
        (Runtime::move_player2_up, PlayerId::Two, Position::new(4, 3)),
        (Runtime::move_player2_down, PlayerId::Two, Position::new(4, 4)),
        (Runtime::move_player2_left, PlayerId::Two, Position::new(3, 4)),
        (Runtime::move_player2_right, PlayerId::Two, Position::new(4, 4)),
    ];

    for (binding, player, expected) in bindings {
        let report = binding(&runtime).expect("legal move");

        assert_eq!(report.player, player);
        assert_eq!(report.to, expected);
        let moved = (report.to.x - report.from.x).abs() + (report.to.y - report.from.y).abs();
        assert_eq!(moved, 1);
        assert_eq!(runtime.state().player(player).unwrap().position, expected);
        assert!(!runtime.state().player_positions().contains(&report.target.position));
    }
    assert_eq!(runtime.status(), GameStatus::InProcess);
}
