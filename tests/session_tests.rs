//! Session tests - the tokio driver around the engine (virtual time)

mod common;

use std::time::Duration;

use common::{grid_from, settings_for};
use tilerise::core::{AnimationMode, GameEvent, GameState};
use tilerise::runtime::{Session, SessionCommand, SessionConfig, SessionOutput};
use tilerise::types::{Direction, GameSettings};

/// "RRBR": swapping the blue right breaks three reds.
fn one_swap_from_a_match(config: &SessionConfig) -> Session {
    let grid = grid_from(&["....", "RRBR"]);
    let game = GameState::from_grid(config.settings, grid, config.seed)
        .unwrap()
        .with_animation_mode(AnimationMode::Deferred);
    Session::spawn_game(game, config.clone())
}

fn deferred_config(animation_timeout: Duration) -> SessionConfig {
    let grid = grid_from(&["....", "RRBR"]);
    SessionConfig {
        settings: settings_for(&grid, 0).with_speed_ms(1000),
        seed: 4,
        headless: false,
        animation_timeout,
        ..SessionConfig::default()
    }
}

/// Next event that is an animation request or a match
async fn next_gate_event(session: &mut Session) -> GameEvent {
    loop {
        match session.recv().await {
            Some(SessionOutput::Event(
                event @ (GameEvent::Animate(_) | GameEvent::Matched { .. }),
            )) => return event,
            Some(_) => continue,
            None => panic!("session ended early"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_headless_session_runs_to_tick_limit() {
    let config = SessionConfig {
        settings: GameSettings {
            width: 6,
            height: 12,
            speed_ms: 20,
            starting_rows: 3,
        },
        seed: 99,
        headless: true,
        max_ticks: Some(150),
        ..SessionConfig::default()
    };
    let mut session = Session::spawn(config).unwrap();

    let mut rows_added = 0;
    let mut finished = None;
    while let Some(output) = session.recv().await {
        match output {
            SessionOutput::Event(GameEvent::RowAdded) => rows_added += 1,
            SessionOutput::Event(GameEvent::Animate(request)) => {
                panic!("headless session asked for {:?}", request)
            }
            SessionOutput::Event(_) => {}
            SessionOutput::Finished(summary) => finished = Some(summary),
        }
    }

    let finished = finished.expect("finished message");
    assert_eq!(finished.ticks, 150);
    assert_eq!(finished.seed, 99);
    assert!(!finished.game_over);
    assert_eq!(rows_added, 1);

    let summary = session.join().await.unwrap();
    assert_eq!(summary, finished);
}

#[tokio::test(start_paused = true)]
async fn test_animation_timeout_forces_completion() {
    let config = deferred_config(Duration::from_millis(50));
    let mut session = one_swap_from_a_match(&config);

    session
        .send(SessionCommand::SwapAt {
            x: 2,
            y: 1,
            dir: Direction::Right,
        })
        .await
        .unwrap();

    // Nobody answers; each request is forced once its deadline passes.
    match next_gate_event(&mut session).await {
        GameEvent::Animate(request) => assert_eq!(request.kind.as_str(), "swap"),
        other => panic!("expected a swap request, got {:?}", other),
    }
    match next_gate_event(&mut session).await {
        GameEvent::Animate(request) => assert_eq!(request.kind.as_str(), "break"),
        other => panic!("expected a break request, got {:?}", other),
    }
    match next_gate_event(&mut session).await {
        GameEvent::Matched { tiles, score, .. } => {
            assert_eq!(tiles, 3);
            assert_eq!(score, 3);
        }
        other => panic!("expected a match, got {:?}", other),
    }

    session.send(SessionCommand::Shutdown).await.unwrap();
    let summary = session.join().await.unwrap();
    assert_eq!(summary.score, 3);
    assert!(!summary.game_over);
}

#[tokio::test(start_paused = true)]
async fn test_completions_drive_the_cascade() {
    let config = deferred_config(Duration::from_secs(60));
    let mut session = one_swap_from_a_match(&config);
    let snapshots = session.snapshots();

    session
        .send(SessionCommand::SwapAt {
            x: 2,
            y: 1,
            dir: Direction::Right,
        })
        .await
        .unwrap();

    let mut kinds = Vec::new();
    loop {
        match next_gate_event(&mut session).await {
            GameEvent::Animate(request) => {
                kinds.push(request.kind.as_str());
                session
                    .send(SessionCommand::AnimationDone(request.id))
                    .await
                    .unwrap();
            }
            GameEvent::Matched { .. } => break,
            _ => unreachable!(),
        }
    }
    assert_eq!(kinds, vec!["swap", "break"]);

    session.send(SessionCommand::Shutdown).await.unwrap();
    let summary = session.join().await.unwrap();
    assert_eq!(summary.score, 3);

    let snap = snapshots.borrow().clone();
    assert_eq!(snap.score, 3);
    assert!(!snap.busy);
    assert_eq!(snap.cells.iter().flatten().count(), 1);
}
