//! Grid module - owns the tile layout
//!
//! The grid is `width` columns by `height` rows. Row 0 is the top; new rows are pushed
//! at the bottom while the top row scrolls off.
//! Storage is a flat array of cells used as a ring of rows: shifting the top row only
//! moves the ring head, so no cell data is copied when the stack rises.
//!
//! `get`, `set`, `shift_top_row`, `push_bottom_row` and `restore_top_row` are the only
//! primitives. Everything else (matching, gravity, swaps) is composed from them.

use crate::types::{Cell, Row, Tile, TileId};

/// The tile grid - ring of rows over flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat cell storage, `height` slots of `width` cells each
    cells: Vec<Cell>,
    /// Storage slot holding logical row 0
    head: usize,
    /// Number of logical rows currently held (`height` except mid-shift)
    rows: usize,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            head: 0,
            rows: height,
        }
    }

    /// Build a grid from explicit rows (row 0 first)
    ///
    /// Panics if the rows are ragged; intended for fixtures and tests.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(
            rows.iter().all(|r| r.len() == width),
            "every row must have the same width"
        );

        let mut grid = Self::new(width, height);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, cell) in row.into_iter().enumerate() {
                grid.set(x, y, cell);
            }
        }
        grid
    }

    /// Calculate flat index from logical (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.rows {
            return None;
        }
        let slot = (self.head + y) % self.height;
        Some(slot * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Logical row count; equals `height()` whenever no shift is in progress
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Out of bounds reads as empty
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    /// Remove and return the top row; every other row moves up one index
    pub fn shift_top_row(&mut self) -> Row {
        debug_assert!(self.rows > 0, "shift on an empty grid");
        let row = self.row(0);
        let start = self.head * self.width;
        for cell in &mut self.cells[start..start + self.width] {
            *cell = None;
        }
        self.head = (self.head + 1) % self.height;
        self.rows -= 1;
        row
    }

    /// Append a row below the current bottom row
    pub fn push_bottom_row(&mut self, row: Row) {
        debug_assert!(self.rows < self.height, "push on a full grid");
        debug_assert_eq!(row.len(), self.width, "row width mismatch");
        self.rows += 1;
        let y = self.rows - 1;
        for (x, cell) in row.into_iter().enumerate().take(self.width) {
            self.set(x, y, cell);
        }
    }

    /// Put a previously shifted row back on top (reverts `shift_top_row`)
    pub fn restore_top_row(&mut self, row: Row) {
        debug_assert!(self.rows < self.height, "restore on a full grid");
        debug_assert_eq!(row.len(), self.width, "row width mismatch");
        self.head = (self.head + self.height - 1) % self.height;
        self.rows += 1;
        for (x, cell) in row.into_iter().enumerate().take(self.width) {
            self.set(x, 0, cell);
        }
    }

    /// Copy out row `y` (empty row when out of bounds)
    pub fn row(&self, y: usize) -> Row {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        (0..self.width).all(|x| self.get(x, y).is_none())
    }

    /// Exchange the contents of two cells
    /// Returns false (and changes nothing) if either is out of bounds
    pub fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) -> bool {
        if self.index(a.0, a.1).is_none() || self.index(b.0, b.1).is_none() {
            return false;
        }
        let first = self.get(a.0, a.1);
        let second = self.get(b.0, b.1);
        self.set(a.0, a.1, second);
        self.set(b.0, b.1, first);
        true
    }

    /// Locate a tile by id
    ///
    /// This is a full O(width × height) scan; grids are small enough that an id index
    /// is not worth keeping in sync with every mutation.
    pub fn find(&self, id: TileId) -> Option<(usize, usize)> {
        (0..self.rows).find_map(|y| {
            (0..self.width).find_map(|x| match self.get(x, y) {
                Some(tile) if tile.id == id => Some((x, y)),
                _ => None,
            })
        })
    }

    /// Tile with the given id, if it is still on the grid
    pub fn tile(&self, id: TileId) -> Option<Tile> {
        self.find(id).and_then(|(x, y)| self.get(x, y))
    }

    /// Count occupied cells
    pub fn occupied(&self) -> usize {
        self.iter().filter(|(_, _, cell)| cell.is_some()).count()
    }

    /// Largest tile id on the grid
    pub fn max_id(&self) -> Option<TileId> {
        self.iter().filter_map(|(_, _, cell)| cell.map(|t| t.id)).max()
    }

    /// Iterate `(x, y, cell)` row by row, top row first
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.get(x, y))))
    }

    /// Logical rows, top first (allocates; for display and tests)
    pub fn to_rows(&self) -> Vec<Row> {
        (0..self.rows).map(|y| self.row(y)).collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileColor;

    fn tile(id: u32) -> Cell {
        Some(Tile::new(id, TileColor::Red))
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(6, 12);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(5, 0), Some(5));
        assert_eq!(grid.index(0, 1), Some(6));
        assert_eq!(grid.index(5, 11), Some(71));
        assert_eq!(grid.index(6, 0), None);
        assert_eq!(grid.index(0, 12), None);
    }

    #[test]
    fn test_ring_head_wraps() {
        let mut grid = Grid::new(2, 3);
        grid.set(0, 0, tile(1));
        grid.set(0, 1, tile(2));

        let top = grid.shift_top_row();
        assert_eq!(top[0].map(|t| t.id), Some(TileId(1)));
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.get(0, 0).map(|t| t.id), Some(TileId(2)));

        grid.push_bottom_row(vec![tile(3), None]);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.head, 1);
        assert_eq!(grid.get(0, 2).map(|t| t.id), Some(TileId(3)));
        // Slot 0 is reused for the new bottom row.
        assert_eq!(grid.cells[0].map(|t| t.id), Some(TileId(3)));
    }

    #[test]
    fn test_restore_reverts_shift() {
        let mut grid = Grid::new(3, 4);
        grid.set(1, 0, tile(7));
        grid.set(2, 3, tile(8));
        let before = grid.to_rows();

        let top = grid.shift_top_row();
        grid.restore_top_row(top);

        assert_eq!(grid.to_rows(), before);
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn test_find_after_wrap() {
        let mut grid = Grid::new(2, 2);
        for id in 0..5 {
            let _ = grid.shift_top_row();
            grid.push_bottom_row(vec![None, tile(id)]);
        }
        assert_eq!(grid.find(TileId(4)), Some((1, 1)));
        assert_eq!(grid.find(TileId(3)), Some((1, 0)));
        assert_eq!(grid.find(TileId(0)), None);
    }
}
