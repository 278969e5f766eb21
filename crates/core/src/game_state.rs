//! Game state module - cascade orchestration and pacing
//!
//! This module ties together the grid, row generator, matcher, gravity and pacing. It
//! owns every grid mutation and sequences them as a cascade:
//!
//! ```text
//! swap → check both tiles → (match → break → gravity → settle)* → idle
//! tick → gravity → settle → travel → (row add → settle)
//! ```
//!
//! # Suspension
//!
//! Work is kept on an explicit LIFO stack of jobs so that a nested cascade finishes
//! before the pass that triggered it resumes. Whenever a job needs an animation the
//! engine parks in a [`Phase`] and stops until [`GameState::complete_animation`] is
//! called with the matching id. While parked, swaps and ticks are queued in arrival
//! order (at most one tick is kept) and replayed once the stack is empty again, so two
//! mutations never interleave.
//!
//! # Lifecycle
//!
//! `Initializing → Running → {Paused ⇄ Running} → GameOver`. Initialization runs
//! headless and awards nothing; once the game is over nothing touches the grid again.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::animation::{AnimationId, AnimationKind, AnimationMode, AnimationRequest, PlacedTile};
use crate::error::{validate, SettingsError};
use crate::events::GameEvent;
use crate::gravity::{self, Fall};
use crate::grid::Grid;
use crate::matcher::{self, MatchSet};
use crate::pacing::{self, Pacer, Travel};
use crate::rng::RowGenerator;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Deferred grid work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    /// Look for a match around a tile, wherever it is now
    CheckTile(TileId),
    /// Scan every cell starting at the given settle index
    Settle { next: usize },
    Gravity,
    /// Pacing step at the end of a tick
    Travel,
}

/// Command waiting for the animation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Swap { tile: TileId, dir: Direction },
    Tick,
}

/// Where the engine is parked
#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingSwap {
        id: AnimationId,
        origin: TileId,
        target: Option<TileId>,
        dir: Direction,
    },
    AwaitingBreak {
        id: AnimationId,
        tiles: ArrayVec<TileId, MAX_MATCH_TILES>,
    },
    AwaitingFall {
        id: AnimationId,
        falls: Vec<Fall>,
    },
}

impl Phase {
    fn animation(&self) -> Option<AnimationId> {
        match self {
            Phase::Idle => None,
            Phase::AwaitingSwap { id, .. }
            | Phase::AwaitingBreak { id, .. }
            | Phase::AwaitingFall { id, .. } => Some(*id),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    settings: GameSettings,
    grid: Grid,
    rows: RowGenerator,
    pacer: Pacer,
    score: u32,
    status: GameStatus,
    panic: bool,
    super_panic: bool,
    mode: AnimationMode,
    phase: Phase,
    /// Last animation id handed out
    animation_seq: u32,
    jobs: Vec<Job>,
    queue: VecDeque<Command>,
    /// Most swaps kept waiting behind an animation
    queue_limit: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new game: pre-fill `starting_rows` rows and settle them
    ///
    /// Any matches the pre-fill produces are resolved headless and award nothing.
    pub fn init(settings: GameSettings, seed: u32) -> Result<Self, SettingsError> {
        validate(&settings)?;

        let width = settings.width as usize;
        let height = settings.height as usize;
        let mut game = Self::with_parts(
            settings,
            Grid::new(width, height),
            RowGenerator::new(width, seed),
        );

        for _ in 0..settings.starting_rows {
            game.push_row();
        }
        game.jobs.push(Job::Settle { next: 0 });
        game.run();

        game.status = GameStatus::Running;
        game.events.clear();
        debug!(
            width,
            height,
            rows = settings.starting_rows,
            seed,
            "game initialized"
        );
        Ok(game)
    }

    /// Start a running game on a prepared grid
    ///
    /// No settle pass runs; call [`settle`](Self::settle) to resolve the layout.
    pub fn from_grid(settings: GameSettings, grid: Grid, seed: u32) -> Result<Self, SettingsError> {
        validate(&settings)?;
        if grid.width() != settings.width as usize || grid.height() != settings.height as usize {
            return Err(SettingsError::GridMismatch {
                width: grid.width(),
                height: grid.height(),
            });
        }

        let first_id = grid.max_id().map(|id| id.0 + 1).unwrap_or(1);
        let rows = RowGenerator::starting_at(grid.width(), seed, first_id);
        let mut game = Self::with_parts(settings, grid, rows);
        game.status = GameStatus::Running;
        game.refresh_panic();
        game.events.clear();
        Ok(game)
    }

    fn with_parts(settings: GameSettings, grid: Grid, rows: RowGenerator) -> Self {
        Self {
            settings,
            grid,
            rows,
            pacer: Pacer::new(settings.speed_ms, settings.starting_rows),
            score: 0,
            status: GameStatus::Initializing,
            panic: false,
            super_panic: false,
            mode: AnimationMode::Headless,
            phase: Phase::Idle,
            animation_seq: 0,
            jobs: Vec::new(),
            queue: VecDeque::new(),
            queue_limit: DEFAULT_QUEUE_LIMIT,
            events: Vec::new(),
        }
    }

    /// Builder form of [`set_animation_mode`](Self::set_animation_mode)
    pub fn with_animation_mode(mut self, mode: AnimationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cap the swaps queued behind an animation (at least one)
    pub fn with_queue_limit(mut self, limit: usize) -> Self {
        self.queue_limit = limit.max(1);
        self
    }

    /// Choose how animation requests resolve from now on
    ///
    /// Switching to headless while a request is outstanding completes it.
    pub fn set_animation_mode(&mut self, mode: AnimationMode) {
        self.mode = mode;
        if mode == AnimationMode::Headless {
            if let Some(id) = self.phase.animation() {
                self.complete_animation(id);
            }
        }
    }

    // ---- read model ----

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The row that the next row add will push
    pub fn next_row_preview(&self) -> &[Cell] {
        self.rows.preview()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pause_frames(&self) -> u32 {
        self.pacer.pause_frames()
    }

    pub fn distance_to_next_row(&self) -> u32 {
        self.pacer.distance()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn panic(&self) -> bool {
        self.panic
    }

    pub fn super_panic(&self) -> bool {
        self.super_panic
    }

    pub fn panic_state(&self) -> PanicState {
        PanicState::from_flags(self.panic, self.super_panic)
    }

    pub fn animation_mode(&self) -> AnimationMode {
        self.mode
    }

    /// Whether an animation is outstanding
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Id of the outstanding animation, if any
    pub fn pending_animation(&self) -> Option<AnimationId> {
        self.phase.animation()
    }

    /// Current RNG state
    pub fn seed(&self) -> u32 {
        self.rows.seed()
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.write_cells(self.grid.iter().map(|(_, _, cell)| cell));
        out.write_next_row(self.rows.preview());
        out.score = self.score;
        out.pause_frames = self.pacer.pause_frames();
        out.distance_to_next_row = self.pacer.distance();
        out.status = self.status;
        out.panic = self.panic_state();
        out.busy = self.is_busy();
        out.seed = self.rows.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    // ---- inbound commands ----

    /// Swap a tile with its horizontal neighbour
    ///
    /// Returns false when the swap is rejected outright (game over, unknown tile, off the
    /// grid, or either tile breaking or falling). While an animation is outstanding the
    /// swap is queued and validated once it reaches the front; once the queue is full
    /// further swaps are dropped and return false.
    pub fn swap(&mut self, tile: TileId, dir: Direction) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        if self.is_busy() {
            let queued = self
                .queue
                .iter()
                .filter(|cmd| matches!(cmd, Command::Swap { .. }))
                .count();
            if queued >= self.queue_limit {
                trace!(tile = tile.0, queued, "swap queue full, dropping swap");
                return false;
            }
            trace!(tile = tile.0, dir = dir.as_str(), "swap queued behind animation");
            self.queue.push_back(Command::Swap { tile, dir });
            return true;
        }

        let started = self.start_swap(tile, dir);
        self.run();
        started
    }

    /// Swap the tile currently at (x, y)
    pub fn swap_at(&mut self, x: usize, y: usize, dir: Direction) -> bool {
        match self.grid.get(x, y) {
            Some(tile) => self.swap(tile.id, dir),
            None => false,
        }
    }

    /// One pacing tick: gravity, settle, then travel or burn pause frames
    ///
    /// A tick while paused does nothing. A tick while an animation is outstanding is
    /// deferred; further ticks coalesce into that one.
    pub fn tick(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        if self.is_busy() {
            if !self.queue.contains(&Command::Tick) {
                self.queue.push_back(Command::Tick);
            }
            return true;
        }

        self.start_tick();
        self.run();
        true
    }

    /// Freeze travel and row spawns
    ///
    /// An outstanding animation still completes normally.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        debug!("paused");
        true
    }

    pub fn unpause(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        debug!("unpaused");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.unpause(),
            _ => false,
        }
    }

    /// Signal that the animation with this id finished
    ///
    /// Stale or repeated ids are ignored, so each request completes exactly once.
    pub fn complete_animation(&mut self, id: AnimationId) -> bool {
        if self.phase.animation() != Some(id) {
            trace!(id = id.0, "ignoring completion for unknown animation");
            return false;
        }

        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        self.resume(phase);
        self.run();
        true
    }

    /// Run a full settle pass now
    pub fn settle(&mut self) -> bool {
        if self.game_over() || self.is_busy() {
            return false;
        }
        self.jobs.push(Job::Settle { next: 0 });
        self.run();
        true
    }

    /// Scroll the stack up by one row
    ///
    /// Returns false (and ends the game) when the top row is still occupied; the grid is
    /// left exactly as it was.
    pub fn add_row(&mut self) -> bool {
        if self.game_over() || self.is_busy() {
            return false;
        }
        if !self.push_row() {
            return false;
        }
        self.jobs.push(Job::Settle { next: 0 });
        self.run();
        true
    }

    // ---- cascade ----

    fn accepts_commands(&self) -> bool {
        matches!(self.status, GameStatus::Running | GameStatus::Paused)
    }

    fn headless(&self) -> bool {
        self.mode == AnimationMode::Headless || self.status == GameStatus::Initializing
    }

    /// Drain jobs, then queued commands, until parked or out of work
    fn run(&mut self) {
        loop {
            if self.is_busy() {
                break;
            }
            if self.game_over() {
                self.jobs.clear();
                self.queue.clear();
                break;
            }
            if let Some(job) = self.jobs.pop() {
                self.exec(job);
                continue;
            }
            match self.queue.pop_front() {
                Some(Command::Swap { tile, dir }) => {
                    self.start_swap(tile, dir);
                }
                Some(Command::Tick) => self.start_tick(),
                None => break,
            }
        }
        self.check_invariants();
    }

    fn exec(&mut self, job: Job) {
        match job {
            Job::CheckTile(id) => {
                if let Some((x, y)) = self.grid.find(id) {
                    if let Some(set) = matcher::find_match(&self.grid, x, y) {
                        self.break_tiles(set);
                    }
                }
            }
            Job::Settle { next } => self.settle_from(next),
            Job::Gravity => self.apply_gravity(),
            Job::Travel => self.travel(),
        }
    }

    fn next_animation_id(&mut self) -> AnimationId {
        self.animation_seq = self.animation_seq.wrapping_add(1);
        AnimationId(self.animation_seq)
    }

    /// Hand an animation to the collaborator and park, or finish it inline when headless
    fn suspend(&mut self, kind: AnimationKind, phase: Phase) {
        if self.headless() {
            self.resume(phase);
            return;
        }

        let Some(id) = phase.animation() else {
            return;
        };
        trace!(id = id.0, kind = kind.as_str(), "awaiting animation");
        self.events
            .push(GameEvent::Animate(AnimationRequest { id, kind }));
        self.phase = phase;
    }

    fn resume(&mut self, phase: Phase) {
        match phase {
            Phase::Idle => {}
            Phase::AwaitingSwap {
                origin,
                target,
                dir,
                ..
            } => self.finish_swap(origin, target, dir),
            Phase::AwaitingBreak { tiles, .. } => self.finish_break(&tiles),
            Phase::AwaitingFall { falls, .. } => self.finish_fall(&falls),
        }
    }

    fn start_swap(&mut self, tile: TileId, dir: Direction) -> bool {
        if self.game_over() {
            return false;
        }
        let Some((x, y)) = self.grid.find(tile) else {
            return false;
        };
        let Some(tx) = dir.apply(x).filter(|&tx| tx < self.grid.width()) else {
            return false;
        };
        let Some(origin) = self.grid.get(x, y) else {
            return false;
        };
        let target = self.grid.get(tx, y);
        if !origin.is_idle() || target.is_some_and(|t| !t.is_idle()) {
            return false;
        }

        debug!(tile = tile.0, x, y, dir = dir.as_str(), "swap");
        let id = self.next_animation_id();
        self.suspend(
            AnimationKind::Swap {
                origin: PlacedTile { tile: origin, x, y },
                target,
                to: (tx, y),
            },
            Phase::AwaitingSwap {
                id,
                origin: tile,
                target: target.map(|t| t.id),
                dir,
            },
        );
        true
    }

    fn finish_swap(&mut self, origin: TileId, target: Option<TileId>, dir: Direction) {
        // Positions are looked up again; slots may have been reordered for the animation.
        let Some((x, y)) = self.grid.find(origin) else {
            return;
        };
        let to = match target {
            Some(id) => self.grid.find(id),
            None => dir
                .apply(x)
                .filter(|&tx| tx < self.grid.width())
                .map(|tx| (tx, y)),
        };
        let Some(to) = to else {
            return;
        };

        self.grid.swap_cells((x, y), to);

        // Checked in reverse push order: the cell the origin left, then the origin.
        self.jobs.push(Job::Gravity);
        self.jobs.push(Job::CheckTile(origin));
        if let Some(id) = target {
            self.jobs.push(Job::CheckTile(id));
        }
    }

    fn settle_from(&mut self, next: usize) {
        let height = self.grid.height();
        let total = self.grid.width() * height;

        for index in next..total {
            let (x, y) = matcher::settle_position(index, height);
            if let Some(set) = matcher::find_match(&self.grid, x, y) {
                self.jobs.push(Job::Settle { next: index + 1 });
                self.break_tiles(set);
                return;
            }
        }
    }

    fn break_tiles(&mut self, set: MatchSet) {
        let mut placed = Vec::with_capacity(set.len());
        let mut ids = ArrayVec::<TileId, MAX_MATCH_TILES>::new();

        for &(x, y) in &set {
            if let Some(mut tile) = self.grid.get(x, y) {
                tile.state = TileState::Breaking;
                self.grid.set(x, y, Some(tile));
                placed.push(PlacedTile { tile, x, y });
                ids.push(tile.id);
            }
        }

        if self.status != GameStatus::Initializing {
            self.score = self.score.saturating_add(ids.len() as u32);
        }
        debug!(tiles = ids.len(), score = self.score, "match");

        let id = self.next_animation_id();
        self.suspend(
            AnimationKind::Break { tiles: placed },
            Phase::AwaitingBreak { id, tiles: ids },
        );
    }

    fn finish_break(&mut self, tiles: &[TileId]) {
        for &id in tiles {
            if let Some((x, y)) = self.grid.find(id) {
                self.grid.set(x, y, None);
            }
        }

        let awarded = if self.status != GameStatus::Initializing {
            self.pacer.award(tiles.len())
        } else {
            0
        };
        self.events.push(GameEvent::Matched {
            tiles: tiles.len(),
            score: self.score,
            pause_frames: awarded,
        });
        self.jobs.push(Job::Gravity);
    }

    fn apply_gravity(&mut self) {
        let falls = gravity::resolve(&mut self.grid);
        if falls.is_empty() {
            return;
        }

        let id = self.next_animation_id();
        self.suspend(
            AnimationKind::Fall {
                falls: falls.clone(),
            },
            Phase::AwaitingFall { id, falls },
        );
    }

    fn finish_fall(&mut self, falls: &[Fall]) {
        gravity::land(&mut self.grid, falls);
        self.refresh_panic();
        self.jobs.push(Job::Settle { next: 0 });
    }

    // ---- pacing ----

    fn start_tick(&mut self) {
        // Queued ticks can reach here after a pause.
        if self.status != GameStatus::Running {
            return;
        }
        self.jobs.push(Job::Travel);
        self.jobs.push(Job::Settle { next: 0 });
        self.jobs.push(Job::Gravity);
    }

    /// A tick that got past `start_tick` travels even if paused since.
    fn travel(&mut self) {
        match self.pacer.advance() {
            Travel::Held { remaining } => trace!(remaining, "travel held by pause frames"),
            Travel::Moved { offset } => self.events.push(GameEvent::Moved { offset }),
            Travel::RowDue => {
                if self.push_row() {
                    self.events.push(GameEvent::Moved {
                        offset: self.pacer.offset(),
                    });
                    self.jobs.push(Job::Settle { next: 0 });
                }
            }
        }
    }

    /// Shift the top row off and commit the preview at the bottom
    fn push_row(&mut self) -> bool {
        let top = self.grid.shift_top_row();
        if top.iter().any(Option::is_some) {
            self.grid.restore_top_row(top);
            self.lose();
            return false;
        }

        let row = self.rows.draw();
        self.grid.push_bottom_row(row);
        debug_assert_eq!(self.grid.row_count(), self.grid.height());

        debug!(next_id = self.rows.next_id().0, "row added");
        self.events.push(GameEvent::RowAdded);
        self.refresh_panic();
        true
    }

    fn refresh_panic(&mut self) {
        let before = self.panic_state();
        self.panic = !self.grid.is_row_empty(PANIC_ROW);
        self.super_panic = !self.grid.is_row_empty(SUPER_PANIC_ROW);
        let after = self.panic_state();
        debug_assert_eq!(after, pacing::panic_state(&self.grid));

        if before != after {
            debug!(state = after.as_str(), "panic state changed");
            self.events.push(GameEvent::PanicChanged(after));
        }
    }

    fn lose(&mut self) {
        if self.game_over() {
            return;
        }
        self.status = GameStatus::GameOver;
        self.jobs.clear();
        self.queue.clear();
        info!(score = self.score, "game over");
        self.events.push(GameEvent::Lost { score: self.score });
    }

    /// Fail fast on logic bugs (debug builds only)
    fn check_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if self.is_busy() {
                return;
            }
            assert_eq!(self.grid.row_count(), self.grid.height(), "row count drifted");
            let mut ids: Vec<TileId> = self
                .grid
                .iter()
                .filter_map(|(_, _, cell)| cell.map(|t| t.id))
                .collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "tile id collision");
        }
    }

    /// Mutable grid access for tests
    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
