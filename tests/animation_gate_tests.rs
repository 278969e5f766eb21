//! Animation gate tests - deferred requests, queueing and completion ids

mod common;

use common::{glyphs, grid_from, settings_for};
use tilerise::core::{AnimationId, AnimationKind, AnimationMode, GameEvent, GameState};
use tilerise::types::{Direction, GameStatus, TileId, MAX_DIST, TRAVEL_STEP};

fn deferred(rows: &[&str]) -> GameState {
    let grid = grid_from(rows);
    GameState::from_grid(settings_for(&grid, 0), grid, 1)
        .unwrap()
        .with_animation_mode(AnimationMode::Deferred)
}

/// Every animation request emitted since the last drain, in order
fn requests(game: &mut GameState) -> Vec<(AnimationId, &'static str)> {
    game.drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::Animate(request) => Some((request.id, request.kind.as_str())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_queued_swap_runs_after_completion() {
    let mut game = deferred(&["...", "RBG"]);

    assert!(game.swap(TileId(1), Direction::Right));
    assert!(game.swap(TileId(3), Direction::Left));
    assert_eq!(requests(&mut game), vec![(AnimationId(1), "swap")]);
    assert_eq!(glyphs(game.grid())[1], "RBG");

    // The first swap lands, then the queued one starts.
    assert!(game.complete_animation(AnimationId(1)));
    assert_eq!(glyphs(game.grid())[1], "BRG");
    assert_eq!(requests(&mut game), vec![(AnimationId(2), "swap")]);
    assert!(game.is_busy());

    assert!(game.complete_animation(AnimationId(2)));
    assert_eq!(glyphs(game.grid())[1], "BGR");
    assert!(!game.is_busy());
}

#[test]
fn test_deferred_cascade_requests_in_order() {
    let mut game = deferred(&["....", ".Y..", ".G..", "RRBR"]);

    assert!(game.swap_at(2, 3, Direction::Right));
    let swap = requests(&mut game);
    assert_eq!(swap, vec![(AnimationId(1), "swap")]);

    assert!(game.complete_animation(swap[0].0));
    let brk = requests(&mut game);
    assert_eq!(brk, vec![(AnimationId(2), "break")]);
    assert_eq!(game.score(), 3);

    assert!(game.complete_animation(brk[0].0));
    let events = game.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Matched { tiles: 3, .. })));
    let fall = events
        .iter()
        .find_map(|e| match e {
            GameEvent::Animate(request) => Some(request.clone()),
            _ => None,
        })
        .expect("fall request");
    assert_eq!(fall.id, AnimationId(3));
    match &fall.kind {
        AnimationKind::Fall { falls } => assert_eq!(falls.len(), 2),
        other => panic!("expected a fall, got {:?}", other),
    }

    assert!(game.complete_animation(fall.id));
    assert!(!game.is_busy());
    assert_eq!(glyphs(game.grid()), vec!["....", "....", ".Y..", ".G.B"]);
}

#[test]
fn test_ticks_coalesce_while_busy() {
    let mut game = deferred(&["...", "RBG"]);
    assert_eq!(game.distance_to_next_row(), MAX_DIST);

    assert!(game.swap(TileId(1), Direction::Right));
    for _ in 0..5 {
        assert!(game.tick());
    }
    assert_eq!(game.distance_to_next_row(), MAX_DIST);

    let id = game.pending_animation().unwrap();
    assert!(game.complete_animation(id));
    assert_eq!(game.distance_to_next_row(), MAX_DIST - 1);
    assert!(!game.is_busy());
}

#[test]
fn test_stale_and_repeated_ids_are_ignored() {
    let mut game = deferred(&["...", "RBG"]);

    // Nothing outstanding yet
    assert!(!game.complete_animation(AnimationId(1)));

    assert!(game.swap(TileId(1), Direction::Right));
    let id = game.pending_animation().unwrap();
    assert!(!game.complete_animation(AnimationId(id.0 + 7)));
    assert!(game.is_busy());
    assert_eq!(glyphs(game.grid())[1], "RBG");

    assert!(game.complete_animation(id));
    assert!(!game.complete_animation(id));
    assert_eq!(glyphs(game.grid())[1], "BRG");
}

#[test]
fn test_pause_does_not_cancel_animation() {
    let mut game = deferred(&["...", "RBG"]);

    assert!(game.swap(TileId(1), Direction::Right));
    assert!(game.pause());
    assert!(game.is_busy());

    let id = game.pending_animation().unwrap();
    assert!(game.complete_animation(id));
    assert_eq!(glyphs(game.grid())[1], "BRG");
    assert_eq!(game.status(), GameStatus::Paused);

    // Still paused: no travel
    assert!(!game.tick());
    assert_eq!(game.distance_to_next_row(), MAX_DIST);
}

#[test]
fn test_pause_mid_tick_keeps_that_ticks_travel() {
    let mut game = deferred(&["R..", "...", "BGY"]);

    // The tick's gravity pass drops the red and waits on the fall.
    assert!(game.tick());
    assert!(game.is_busy());
    // A second tick queues behind it.
    assert!(game.tick());
    assert!(game.pause());

    let id = game.pending_animation().unwrap();
    assert!(game.complete_animation(id));
    assert_eq!(glyphs(game.grid()), vec!["...", "R..", "BGY"]);

    // The started tick travels; the queued one is dropped by the pause.
    assert_eq!(game.distance_to_next_row(), MAX_DIST - TRAVEL_STEP);
    assert!(!game.is_busy());
    assert!(game.unpause());
    assert!(game.tick());
    assert_eq!(game.distance_to_next_row(), MAX_DIST - 2 * TRAVEL_STEP);
}

#[test]
fn test_swap_queue_is_capped() {
    let mut game = deferred(&["...", "RBG"]).with_queue_limit(2);

    assert!(game.swap(TileId(1), Direction::Right));
    assert!(game.swap(TileId(3), Direction::Left));
    assert!(game.swap(TileId(2), Direction::Right));
    assert!(!game.swap(TileId(1), Direction::Left));
    // Ticks are not swaps and still coalesce behind the animation.
    assert!(game.tick());

    // The first swap plus the two queued ones: RBG -> BRG -> BGR -> GBR
    let mut swaps = 0;
    while let Some(id) = game.pending_animation() {
        swaps += 1;
        assert!(game.complete_animation(id));
    }
    assert_eq!(swaps, 3);
    assert_eq!(glyphs(game.grid())[1], "GBR");
    assert_eq!(game.distance_to_next_row(), MAX_DIST - TRAVEL_STEP);
}

#[test]
fn test_switching_to_headless_completes_pending_request() {
    let mut game = deferred(&["...", "RBG"]);

    assert!(game.swap(TileId(1), Direction::Right));
    assert!(game.is_busy());

    game.set_animation_mode(AnimationMode::Headless);
    assert!(!game.is_busy());
    assert_eq!(game.pending_animation(), None);
    assert_eq!(glyphs(game.grid())[1], "BRG");

    // Further swaps resolve inline
    assert!(game.swap(TileId(3), Direction::Left));
    assert!(!game.is_busy());
    assert_eq!(glyphs(game.grid())[1], "BGR");
}
