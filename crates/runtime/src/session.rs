//! Session driver.
//!
//! One tokio task owns the [`GameState`]. Everything that mutates it (the pacing
//! interval, player swaps, animation completions, the completion timeout) is funnelled
//! through that task, so the engine never sees two mutations at once.

use std::future;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::config::SessionConfig;
use crate::core::{AnimationId, AnimationMode, GameEvent, GameSnapshot, GameState};
use crate::types::{Direction, TileId};

/// Command delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Swap { tile: TileId, dir: Direction },
    SwapAt { x: usize, y: usize, dir: Direction },
    Pause,
    Unpause,
    TogglePause,
    /// The presentation layer finished playing this animation.
    AnimationDone(AnimationId),
    Shutdown,
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    /// Pacing intervals elapsed
    pub ticks: u64,
    pub seed: u32,
    pub game_over: bool,
}

/// Message published by the session task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutput {
    Event(GameEvent),
    Finished(SessionSummary),
}

/// Running session.
pub struct Session {
    cmd_tx: mpsc::Sender<SessionCommand>,
    out_rx: mpsc::UnboundedReceiver<SessionOutput>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<SessionSummary>,
}

impl Session {
    /// Build a game from `config` and start driving it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: SessionConfig) -> Result<Self> {
        let mode = if config.headless {
            AnimationMode::Headless
        } else {
            AnimationMode::Deferred
        };
        let game = GameState::init(config.settings, config.seed)
            .context("invalid game settings")?
            .with_animation_mode(mode);
        Ok(Self::spawn_game(game, config))
    }

    /// Drive an already constructed game.
    ///
    /// Swaps queued behind an animation are capped at `max_pending_commands`.
    pub fn spawn_game(game: GameState, config: SessionConfig) -> Self {
        let game = game.with_queue_limit(config.max_pending_commands);
        let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());

        let task = tokio::spawn(run_session(game, config, cmd_rx, out_tx, snapshot_tx));

        Self {
            cmd_tx,
            out_rx,
            snapshot_rx,
            task,
        }
    }

    /// Sender for tasks that issue commands on their own.
    pub fn commands(&self) -> mpsc::Sender<SessionCommand> {
        self.cmd_tx.clone()
    }

    pub async fn send(&self, cmd: SessionCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| anyhow!("session closed"))
    }

    /// Next published message; `None` once the session has finished.
    pub async fn recv(&mut self) -> Option<SessionOutput> {
        self.out_rx.recv().await
    }

    pub fn snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Wait for the session task to end (game over, tick limit or shutdown).
    pub async fn join(self) -> Result<SessionSummary> {
        self.task.await.context("session task failed")
    }
}

async fn run_session(
    mut game: GameState,
    config: SessionConfig,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    out_tx: mpsc::UnboundedSender<SessionOutput>,
    snapshot_tx: watch::Sender<GameSnapshot>,
) -> SessionSummary {
    let period = config.tick_interval();
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut deadline: Option<(AnimationId, Instant)> = None;
    let mut ticks = 0u64;

    info!(
        seed = config.seed,
        width = config.settings.width,
        height = config.settings.height,
        speed_ms = config.settings.speed_ms,
        headless = config.headless,
        "session started"
    );

    loop {
        let timeout_at = deadline.map(|(_, at)| at);

        tokio::select! {
            _ = interval.tick() => {
                ticks += 1;
                game.tick();
            }
            cmd = cmd_rx.recv() => match cmd {
                Some(SessionCommand::Shutdown) | None => {
                    debug!("session shutting down");
                    break;
                }
                Some(cmd) => apply(&mut game, cmd),
            },
            _ = sleep_until(timeout_at) => {
                if let Some((id, _)) = deadline.take() {
                    warn!(id = id.0, "animation completion timed out, forcing it");
                    game.complete_animation(id);
                }
            }
        }

        for event in game.drain_events() {
            let _ = out_tx.send(SessionOutput::Event(event));
        }

        // A new request restarts the clock; the same one keeps its deadline.
        deadline = match (game.pending_animation(), deadline) {
            (Some(id), Some((current, at))) if current == id => Some((current, at)),
            (Some(id), _) => Some((id, Instant::now() + config.animation_timeout)),
            (None, _) => None,
        };

        snapshot_tx.send_modify(|snap| game.snapshot_into(snap));

        if game.game_over() {
            break;
        }
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            break;
        }
    }

    let summary = SessionSummary {
        score: game.score(),
        ticks,
        seed: config.seed,
        game_over: game.game_over(),
    };
    info!(score = summary.score, ticks, "session finished");
    let _ = out_tx.send(SessionOutput::Finished(summary));
    summary
}

fn apply(game: &mut GameState, cmd: SessionCommand) {
    let accepted = match cmd {
        SessionCommand::Swap { tile, dir } => game.swap(tile, dir),
        SessionCommand::SwapAt { x, y, dir } => game.swap_at(x, y, dir),
        SessionCommand::Pause => game.pause(),
        SessionCommand::Unpause => game.unpause(),
        SessionCommand::TogglePause => game.toggle_pause(),
        SessionCommand::AnimationDone(id) => game.complete_animation(id),
        SessionCommand::Shutdown => true,
    };
    if !accepted {
        trace!(?cmd, "command ignored");
    }
}

async fn sleep_until(at: Option<Instant>) {
    match at {
        Some(at) => time::sleep_until(at).await,
        None => future::pending().await,
    }
}
