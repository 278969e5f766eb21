//! Gravity module - column compaction
//!
//! One sweep walks every column bottom-to-top and swaps each empty cell with the tile
//! directly above it, so everything above a gap drops one row per sweep. Sweeps repeat
//! until one produces no swap.
//!
//! Tiles that moved are left in the `Falling` state so input cannot grab them while their
//! drop animation plays; [`land`] puts them back to `Idle`.

use tracing::trace;

use crate::grid::Grid;
use crate::types::{TileId, TileState};

/// One tile's total drop over a gravity resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fall {
    pub id: TileId,
    pub from: (usize, usize),
    pub to: (usize, usize),
}

impl Fall {
    /// Rows dropped
    pub fn distance(&self) -> usize {
        self.to.1 - self.from.1
    }
}

/// Run a single sweep, recording moves into `falls`
/// Returns the number of swaps performed
pub fn sweep(grid: &mut Grid, falls: &mut Vec<Fall>) -> usize {
    let mut swaps = 0;

    for x in 0..grid.width() {
        for y in (1..grid.height()).rev() {
            if grid.is_occupied(x, y) {
                continue;
            }
            let Some(above) = grid.get(x, y - 1) else {
                continue;
            };

            grid.swap_cells((x, y), (x, y - 1));
            swaps += 1;

            match falls.iter_mut().find(|f| f.id == above.id) {
                Some(fall) => fall.to = (x, y),
                None => falls.push(Fall {
                    id: above.id,
                    from: (x, y - 1),
                    to: (x, y),
                }),
            }
        }
    }

    swaps
}

/// Sweep until nothing moves and mark every moved tile as falling
pub fn resolve(grid: &mut Grid) -> Vec<Fall> {
    let mut falls = Vec::new();
    let mut sweeps = 0usize;

    while sweep(grid, &mut falls) > 0 {
        sweeps += 1;
    }

    for fall in &falls {
        set_state(grid, fall.id, TileState::Falling);
    }

    if !falls.is_empty() {
        trace!(sweeps, tiles = falls.len(), "gravity settled");
    }
    falls
}

/// Return fallen tiles to rest
pub fn land(grid: &mut Grid, falls: &[Fall]) {
    for fall in falls {
        set_state(grid, fall.id, TileState::Idle);
    }
}

fn set_state(grid: &mut Grid, id: TileId, state: TileState) {
    if let Some((x, y)) = grid.find(id) {
        if let Some(mut tile) = grid.get(x, y) {
            tile.state = state;
            grid.set(x, y, Some(tile));
        }
    }
}
