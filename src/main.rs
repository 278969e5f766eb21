//! Headless tilerise runner (default binary).
//!
//! Plays one game with a scripted autoplayer and a simulated animation layer that
//! completes every request after `--anim-ms`. Every event is printed to stdout as one
//! JSON line, or with `--watch` the board is drawn instead. Logs go to stderr and are
//! filtered with `RUST_LOG`.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tilerise::autoplay::AutoPlayer;
use tilerise::cli::{parse_args, USAGE};
use tilerise::core::{AnimationId, GameEvent, GameSnapshot};
use tilerise::runtime::{Session, SessionCommand, SessionConfig, SessionOutput, WireMessage};
use tilerise::view::BoardView;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    // Only warnings while the board is on screen.
    let default_filter = if options.watch { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = SessionConfig::from_env();
    options.apply(&mut config);

    let mut session = Session::spawn(config.clone()).context("failed to start session")?;
    let mut view = if options.watch {
        let mut view = BoardView::new();
        view.enter()?;
        view.draw(&session.snapshot())?;
        Some(view)
    } else {
        emit(&WireMessage::start(&config))?;
        None
    };

    let player = tokio::spawn(autoplay(
        session.commands(),
        session.snapshots(),
        AutoPlayer::new(config.seed),
        options.swap_interval(),
    ));

    let animation_delay = options.animation_delay();
    while let Some(output) = session.recv().await {
        match output {
            SessionOutput::Event(event) => {
                if let GameEvent::Animate(request) = &event {
                    animate(session.commands(), request.id, animation_delay);
                }
                match view.as_mut() {
                    Some(view) => view.draw(&session.snapshot())?,
                    None => emit(&WireMessage::from(&event))?,
                }
            }
            SessionOutput::Finished(summary) => {
                if view.is_some() {
                    continue;
                }
                emit(&WireMessage::snapshot(&session.snapshot()))?;
                emit(&WireMessage::Finished {
                    score: summary.score,
                    ticks: summary.ticks,
                    seed: summary.seed,
                })?;
            }
        }
    }

    player.abort();
    if let Some(mut view) = view {
        view.draw(&session.snapshot())?;
        view.exit()?;
    }
    let summary = session.join().await?;
    info!(
        score = summary.score,
        ticks = summary.ticks,
        game_over = summary.game_over,
        "done"
    );
    Ok(())
}

/// Play the animation by waiting it out, then report completion.
fn animate(commands: mpsc::Sender<SessionCommand>, id: AnimationId, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = commands.send(SessionCommand::AnimationDone(id)).await;
    });
}

async fn autoplay(
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    mut player: AutoPlayer,
    every: Duration,
) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let pick = player.pick(&snapshots.borrow());
        let Some(cmd) = pick else {
            continue;
        };
        debug!(?cmd, "autoplayer swap");
        if commands.send(cmd).await.is_err() {
            break;
        }
    }
}

fn emit(msg: &WireMessage) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, msg)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
