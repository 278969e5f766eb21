//! Matcher module - same-color run detection
//!
//! A tile can only break once it is resting: every cell from it down to the floor must
//! be occupied. Runs are scanned outwards from an origin cell along both axes; a run of
//! [`MIN_RUN`] or more on either axis is a match, and both axes feed one deduplicated
//! set of broken cells.
//!
//! The check is all-or-nothing. If a scan reaches a same-color tile that is not yet
//! breakable, the whole check for that origin is abandoned rather than truncated, and
//! the origin is only looked at again on a later settle pass.
//!
//! Tiles that are not [`TileState::Idle`](crate::types::TileState) end a run like a
//! color change does.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::grid::Grid;
use crate::types::{TileColor, MAX_GRID_DIM, MAX_MATCH_TILES, MIN_RUN};

/// Cells broken by a single origin, in discovery order, without duplicates
pub type MatchSet = ArrayVec<(usize, usize), MAX_MATCH_TILES>;

/// Cells of one run along one axis, lowest coordinate first
type Run = ArrayVec<(usize, usize), MAX_GRID_DIM>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Whether the tile at (x, y) rests on a fully occupied column
///
/// An empty origin is never breakable.
pub fn is_breakable(grid: &Grid, x: usize, y: usize) -> bool {
    if y >= grid.height() {
        return false;
    }
    (y..grid.height()).all(|below| grid.is_occupied(x, below))
}

/// Find the match, if any, that the tile at (x, y) takes part in
pub fn find_match(grid: &Grid, x: usize, y: usize) -> Option<MatchSet> {
    let origin = grid.get(x, y)?;
    if !origin.is_idle() || !is_breakable(grid, x, y) {
        return None;
    }

    let Some(horizontal) = scan(grid, x, y, origin.color, Axis::Horizontal) else {
        trace!(x, y, "horizontal scan hit an unsettled tile, check aborted");
        return None;
    };
    let Some(vertical) = scan(grid, x, y, origin.color, Axis::Vertical) else {
        trace!(x, y, "vertical scan hit an unsettled tile, check aborted");
        return None;
    };

    let mut broken = MatchSet::new();
    for run in [&horizontal, &vertical] {
        if run.len() < MIN_RUN {
            continue;
        }
        for &pos in run.iter() {
            if !broken.contains(&pos) && broken.try_push(pos).is_err() {
                break;
            }
        }
    }

    if broken.is_empty() {
        None
    } else {
        Some(broken)
    }
}

/// Cell visited by the `index`-th step of a settle pass
///
/// Settle passes walk the grid column by column, top row first within each column.
pub fn settle_position(index: usize, height: usize) -> (usize, usize) {
    (index / height, index % height)
}

/// Scan both directions along one axis
///
/// Returns `None` when the check has to be aborted.
fn scan(grid: &Grid, x: usize, y: usize, color: TileColor, axis: Axis) -> Option<Run> {
    let mut before = Run::new();
    let mut after = Run::new();

    let limit = match axis {
        Axis::Horizontal => grid.width(),
        Axis::Vertical => grid.height(),
    };
    let start = match axis {
        Axis::Horizontal => x,
        Axis::Vertical => y,
    };
    let at = |i: usize| match axis {
        Axis::Horizontal => (i, y),
        Axis::Vertical => (x, i),
    };

    // Towards lower coordinates (left / up)
    for i in (0..start).rev() {
        match step(grid, at(i), color)? {
            true => {
                if before.try_push(at(i)).is_err() {
                    break;
                }
            }
            false => break,
        }
    }

    // Towards higher coordinates (right / down)
    for i in (start + 1)..limit {
        match step(grid, at(i), color)? {
            true => {
                if after.try_push(at(i)).is_err() {
                    break;
                }
            }
            false => break,
        }
    }

    let mut run = Run::new();
    run.extend(before.into_iter().rev());
    let _ = run.try_push(at(start));
    for pos in after {
        if run.try_push(pos).is_err() {
            break;
        }
    }
    Some(run)
}

/// Examine one scanned cell
///
/// `Some(true)` extends the run, `Some(false)` ends it, `None` aborts the whole check.
fn step(grid: &Grid, (x, y): (usize, usize), color: TileColor) -> Option<bool> {
    match grid.get(x, y) {
        Some(tile) if tile.color == color && tile.is_idle() => {
            if is_breakable(grid, x, y) {
                Some(true)
            } else {
                None
            }
        }
        _ => Some(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Tile, TileColor::*, TileState};

    fn grid_from(rows: &[&str]) -> Grid {
        let mut id = 0;
        let rows = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| {
                        id += 1;
                        let color = match c {
                            'R' => Red,
                            'B' => Blue,
                            'G' => Green,
                            'Y' => Yellow,
                            _ => return None,
                        };
                        Some(Tile::new(id, color))
                    })
                    .collect::<Vec<Cell>>()
            })
            .collect();
        Grid::from_rows(rows)
    }

    #[test]
    fn test_breakable_needs_full_column() {
        let grid = grid_from(&["R..", "...", "BBB"]);
        assert!(!is_breakable(&grid, 0, 0));
        assert!(is_breakable(&grid, 0, 2));
        assert!(!is_breakable(&grid, 1, 1));
    }

    #[test]
    fn test_horizontal_run_of_three() {
        let grid = grid_from(&["....", "GRRR"]);
        let set = find_match(&grid, 2, 1).expect("match");
        assert_eq!(set.as_slice(), &[(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_run_of_two_is_not_a_match() {
        let grid = grid_from(&["....", "RRBG"]);
        assert!(find_match(&grid, 0, 1).is_none());
        assert!(find_match(&grid, 1, 1).is_none());
    }

    #[test]
    fn test_cross_dedups_origin() {
        let grid = grid_from(&[".B.", ".B.", "BBB"]);
        let set = find_match(&grid, 1, 2).expect("match");
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_unbreakable_neighbour_aborts_whole_check() {
        // The vertical run at column 0 is complete, but the horizontal scan reaches a
        // red tile hanging over an empty cell.
        let grid = grid_from(&["RR..", "R.GG", "RBYB"]);
        assert!(find_match(&grid, 0, 0).is_none());
        // From the floor the horizontal scan stops at blue, so the column matches.
        let set = find_match(&grid, 0, 2).expect("match");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_non_idle_tiles_end_runs() {
        let mut grid = grid_from(&["...", "RRR"]);
        let mut t = grid.get(2, 1).unwrap();
        t.state = TileState::Breaking;
        grid.set(2, 1, Some(t));
        assert!(find_match(&grid, 0, 1).is_none());
    }

    #[test]
    fn test_settle_position_is_column_major() {
        assert_eq!(settle_position(0, 4), (0, 0));
        assert_eq!(settle_position(3, 4), (0, 3));
        assert_eq!(settle_position(4, 4), (1, 0));
    }
}
