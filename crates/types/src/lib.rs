//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, runtime driver, wire protocol).
//!
//! # Grid Dimensions
//!
//! The default playfield matches the classic handheld layout:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 is the top)
//! - New rows enter at the bottom and the whole stack rises towards row 0
//!
//! # Pacing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_DIST` | 100 | Travel distance between two row spawns |
//! | `TRAVEL_STEP` | 1 | Distance travelled per un-paused tick |
//! | `PAUSE_FRAMES_PER_TILE` | 100 | Pause frames earned per broken tile (before multiplier) |
//! | `PAUSE_FRAMES_COMBO_BONUS` | 500 | Flat bonus per exceeded combo threshold |
//! | `MAX_PAUSE_FRAMES` | 5000 | Cap on accumulated pause frames |
//!
//! Pause frames are counted in the same unit as the tick interval (milliseconds), so a
//! tick at `GameSpeed::Normal` burns 60 of them.
//!
//! # Examples
//!
//! ```
//! use tilerise_types::{Difficulty, GameSettings, GameSpeed, TileColor, DEFAULT_WIDTH};
//!
//! // Parse presets from labels (case-insensitive)
//! assert_eq!(GameSpeed::from_str("fast"), Some(GameSpeed::Fast));
//! assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
//!
//! // Build settings from presets
//! let settings = GameSettings::new(6, 12, GameSpeed::Fast, Difficulty::Hard);
//! assert_eq!(settings.speed_ms, 40);
//! assert_eq!(settings.starting_rows, 7);
//!
//! assert_eq!(TileColor::ALL.len(), 4);
//! assert_eq!(DEFAULT_WIDTH, 6);
//! ```

/// Default grid width in cells
pub const DEFAULT_WIDTH: u8 = 6;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: u8 = 12;

/// Largest supported grid dimension (both axes)
pub const MAX_GRID_DIM: usize = 32;

/// Smallest supported grid height (a row must be able to scroll off while another stays)
pub const MIN_GRID_HEIGHT: usize = 2;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Upper bound on tiles broken by a single match origin (one full row plus one full column)
pub const MAX_MATCH_TILES: usize = MAX_GRID_DIM * 2;

/// Travel distance between two row spawns
pub const MAX_DIST: u32 = 100;

/// Distance travelled per tick while no pause frames are banked
pub const TRAVEL_STEP: u32 = 1;

/// Pause frames earned per broken tile, before the difficulty multiplier
pub const PAUSE_FRAMES_PER_TILE: u32 = 100;

/// Flat pause-frame bonus granted once per exceeded threshold
pub const PAUSE_FRAMES_COMBO_BONUS: u32 = 500;

/// Broken-tile counts that each earn a combo bonus when exceeded
pub const PAUSE_FRAMES_BONUS_THRESHOLDS: [usize; 4] = [3, 4, 5, 6];

/// Cap on banked pause frames
pub const MAX_PAUSE_FRAMES: u32 = 5000;

/// Row (0-based from the top) whose occupancy raises the panic hint
pub const PANIC_ROW: usize = 3;

/// Row (0-based from the top) whose occupancy raises the super-panic hint
pub const SUPER_PANIC_ROW: usize = 1;

/// Default cap on swaps queued behind an outstanding animation
pub const DEFAULT_QUEUE_LIMIT: usize = 64;

/// Default time the runtime waits for an animation completion before forcing it
pub const DEFAULT_ANIMATION_TIMEOUT_MS: u64 = 2000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_defaults() {
        assert_eq!(MAX_DIST, 100);
        assert_eq!(TRAVEL_STEP, 1);
        assert_eq!(MAX_PAUSE_FRAMES, 5000);
        assert!(PANIC_ROW > SUPER_PANIC_ROW);
        assert!(MAX_MATCH_TILES >= MAX_GRID_DIM + MAX_GRID_DIM - 1);
    }

    #[test]
    fn default_settings_match_classic_layout() {
        let settings = GameSettings::default();
        assert_eq!(settings.width, 6);
        assert_eq!(settings.height, 12);
        assert_eq!(settings.speed_ms, GameSpeed::Normal.tick_ms());
        assert_eq!(settings.starting_rows, Difficulty::Normal.rows());
    }

    #[test]
    fn presets_cycle_with_wraparound() {
        assert_eq!(GameSpeed::Fastest.next(), GameSpeed::Slowest);
        assert_eq!(GameSpeed::Slowest.prev(), GameSpeed::Fastest);
        assert_eq!(Difficulty::Impossible.next(), Difficulty::Beginner);
        assert_eq!(Difficulty::Beginner.prev(), Difficulty::Impossible);
        assert_eq!(Difficulty::Normal.next(), Difficulty::Hard);
    }

    #[test]
    fn direction_offsets() {
        assert_eq!(Direction::from_offset(-1), Some(Direction::Left));
        assert_eq!(Direction::from_offset(1), Some(Direction::Right));
        assert_eq!(Direction::from_offset(0), None);
        assert_eq!(Direction::Left.apply(0), None);
        assert_eq!(Direction::Right.apply(4), Some(5));
    }
}

/// The four tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl TileColor {
    /// All colors, in sampling order
    pub const ALL: [TileColor; 4] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilerise_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("red"), Some(TileColor::Red));
    /// assert_eq!(TileColor::from_str("YELLOW"), Some(TileColor::Yellow));
    /// assert_eq!(TileColor::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileColor::Red),
            "blue" => Some(TileColor::Blue),
            "green" => Some(TileColor::Green),
            "yellow" => Some(TileColor::Yellow),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
            TileColor::Yellow => "yellow",
        }
    }
}

/// Lifecycle state of a tile
///
/// - **Idle**: at rest, may be swapped and matched
/// - **Falling**: dropping after gravity, blocked until its fall animation completes
/// - **Breaking**: part of a confirmed match, removed once its break animation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    Idle,
    Falling,
    Breaking,
}

impl TileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileState::Idle => "idle",
            TileState::Falling => "falling",
            TileState::Breaking => "breaking",
        }
    }
}

/// Unique, monotonically increasing tile identifier
///
/// Stable across moves; used to re-locate a tile after an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// A single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub color: TileColor,
    pub state: TileState,
}

impl Tile {
    /// Create an idle tile
    pub fn new(id: u32, color: TileColor) -> Self {
        Self {
            id: TileId(id),
            color,
            state: TileState::Idle,
        }
    }

    /// Whether the tile is at rest
    pub fn is_idle(&self) -> bool {
        self.state == TileState::Idle
    }
}

/// A cell on the grid
///
/// - `None`: empty slot
/// - `Some(Tile)`: slot holding the tile
pub type Cell = Option<Tile>;

/// One full-width row of cells
pub type Row = Vec<Cell>;

/// Horizontal swap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a `-1`/`+1` offset to a direction
    pub fn from_offset(offset: i8) -> Option<Self> {
        match offset {
            -1 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn offset(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Neighbouring column, or `None` when it would be negative
    ///
    /// The upper bound is checked by the caller against the grid width.
    pub fn apply(&self, x: usize) -> Option<usize> {
        match self {
            Direction::Left => x.checked_sub(1),
            Direction::Right => x.checked_add(1),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" | "-1" => Some(Direction::Left),
            "right" | "r" | "1" | "+1" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Tick interval presets (milliseconds per tick, lower is faster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSpeed {
    Slowest,
    Slow,
    Normal,
    Fast,
    Fastest,
}

impl GameSpeed {
    pub const ALL: [GameSpeed; 5] = [
        GameSpeed::Slowest,
        GameSpeed::Slow,
        GameSpeed::Normal,
        GameSpeed::Fast,
        GameSpeed::Fastest,
    ];

    pub fn tick_ms(&self) -> u32 {
        match self {
            GameSpeed::Slowest => 100,
            GameSpeed::Slow => 80,
            GameSpeed::Normal => 60,
            GameSpeed::Fast => 40,
            GameSpeed::Fastest => 20,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slowest" => Some(GameSpeed::Slowest),
            "slow" => Some(GameSpeed::Slow),
            "normal" => Some(GameSpeed::Normal),
            "fast" => Some(GameSpeed::Fast),
            "fastest" => Some(GameSpeed::Fastest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameSpeed::Slowest => "Slowest",
            GameSpeed::Slow => "Slow",
            GameSpeed::Normal => "Normal",
            GameSpeed::Fast => "Fast",
            GameSpeed::Fastest => "Fastest",
        }
    }

    /// Next preset, wrapping from the fastest back to the slowest
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous preset, wrapping from the slowest to the fastest
    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Starting difficulty presets (rows pre-filled before play begins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Easy,
    Normal,
    Hard,
    Expert,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Impossible,
    ];

    pub fn rows(&self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Easy => 3,
            Difficulty::Normal => 5,
            Difficulty::Hard => 7,
            Difficulty::Expert => 9,
            Difficulty::Impossible => 11,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            "impossible" => Some(Difficulty::Impossible),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::Impossible => "Impossible",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSettings {
    pub width: u8,
    pub height: u8,
    /// Tick interval in milliseconds (lower is faster)
    pub speed_ms: u32,
    /// Rows pre-filled at start; also selects the pause-frame multiplier
    pub starting_rows: u8,
}

impl GameSettings {
    /// Build settings from the speed and difficulty presets
    pub fn new(width: u8, height: u8, speed: GameSpeed, difficulty: Difficulty) -> Self {
        Self {
            width,
            height,
            speed_ms: speed.tick_ms(),
            starting_rows: difficulty.rows(),
        }
    }

    pub fn with_starting_rows(mut self, rows: u8) -> Self {
        self.starting_rows = rows;
        self
    }

    pub fn with_speed_ms(mut self, speed_ms: u32) -> Self {
        self.speed_ms = speed_ms;
        self
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            GameSpeed::Normal,
            Difficulty::Normal,
        )
    }
}

/// Controller state machine
///
/// `Initializing → Running → {Paused ⇄ Running} → GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Initializing,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Initializing => "initializing",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Display-only danger tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanicState {
    #[default]
    None,
    Panic,
    SuperPanic,
}

impl PanicState {
    /// Combine the two flags; super-panic wins when both are raised
    pub fn from_flags(panic: bool, super_panic: bool) -> Self {
        if super_panic {
            PanicState::SuperPanic
        } else if panic {
            PanicState::Panic
        } else {
            PanicState::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PanicState::None => "none",
            PanicState::Panic => "panic",
            PanicState::SuperPanic => "super_panic",
        }
    }
}
