//! Pacing module - rising danger line and pause-frame economy
//!
//! Every un-paused tick the stack travels [`TRAVEL_STEP`] towards the next row; once
//! [`MAX_DIST`] has been covered a new row is due. Matches bank pause frames, and while
//! any are banked a tick burns `speed` of them instead of travelling.
//!
//! # Pause-frame awards
//!
//! ```text
//! award = PAUSE_FRAMES_PER_TILE * broken * multiplier
//!       + PAUSE_FRAMES_COMBO_BONUS * (thresholds in {3, 4, 5, 6} that `broken` exceeds)
//! banked = min(banked + award, MAX_PAUSE_FRAMES)
//! ```
//!
//! The multiplier steps down as the starting difficulty goes up, so easier games are
//! more forgiving.

use crate::grid::Grid;
use crate::types::{
    PanicState, MAX_DIST, MAX_PAUSE_FRAMES, PANIC_ROW, PAUSE_FRAMES_BONUS_THRESHOLDS,
    PAUSE_FRAMES_COMBO_BONUS, PAUSE_FRAMES_PER_TILE, SUPER_PANIC_ROW, TRAVEL_STEP,
};

/// Pause-frame multiplier for a starting row count
///
/// | Starting rows | Multiplier |
/// |---------------|------------|
/// | 0-1 | 4 |
/// | 2-3 | 3 |
/// | 4-5 | 2 |
/// | 6+  | 1 |
pub fn difficulty_multiplier(starting_rows: u8) -> u32 {
    match starting_rows {
        0..=1 => 4,
        2..=3 => 3,
        4..=5 => 2,
        _ => 1,
    }
}

/// Pause frames earned by breaking `broken` tiles in one match
pub fn match_award(broken: usize, multiplier: u32) -> u32 {
    let base = PAUSE_FRAMES_PER_TILE
        .saturating_mul(broken as u32)
        .saturating_mul(multiplier);
    let bonuses = PAUSE_FRAMES_BONUS_THRESHOLDS
        .iter()
        .filter(|&&threshold| broken > threshold)
        .count() as u32;
    base.saturating_add(PAUSE_FRAMES_COMBO_BONUS * bonuses)
}

/// Compute the display-only danger tier from row occupancy
pub fn panic_state(grid: &Grid) -> PanicState {
    let panic = !grid.is_row_empty(PANIC_ROW);
    let super_panic = !grid.is_row_empty(SUPER_PANIC_ROW);
    PanicState::from_flags(panic, super_panic)
}

/// Outcome of one travel step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    /// Pause frames were burnt; nothing moved
    Held { remaining: u32 },
    /// The stack moved; `offset` is the distance covered since the last row
    Moved { offset: u32 },
    /// The full distance was covered; a row must be added
    RowDue,
}

/// Travel distance and banked pause frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    speed_ms: u32,
    multiplier: u32,
    pause_frames: u32,
    distance: u32,
}

impl Pacer {
    pub fn new(speed_ms: u32, starting_rows: u8) -> Self {
        Self {
            speed_ms,
            multiplier: difficulty_multiplier(starting_rows),
            pause_frames: 0,
            distance: MAX_DIST,
        }
    }

    pub fn pause_frames(&self) -> u32 {
        self.pause_frames
    }

    /// Distance left before the next row
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Distance covered since the last row (what a renderer scrolls by)
    pub fn offset(&self) -> u32 {
        MAX_DIST - self.distance
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Bank the award for a match and return how many frames were actually added
    pub fn award(&mut self, broken: usize) -> u32 {
        let before = self.pause_frames;
        self.pause_frames = before
            .saturating_add(match_award(broken, self.multiplier))
            .min(MAX_PAUSE_FRAMES);
        self.pause_frames - before
    }

    /// Advance by one tick
    pub fn advance(&mut self) -> Travel {
        if self.pause_frames > 0 {
            self.pause_frames = self.pause_frames.saturating_sub(self.speed_ms);
            return Travel::Held {
                remaining: self.pause_frames,
            };
        }

        self.distance = self.distance.saturating_sub(TRAVEL_STEP);
        if self.distance == 0 {
            self.distance = MAX_DIST;
            Travel::RowDue
        } else {
            Travel::Moved {
                offset: self.offset(),
            }
        }
    }
}
