use crate::types::{Cell, GameStatus, PanicState, TileColor, TileState};

/// Read-only view of one occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub id: u32,
    pub color: TileColor,
    pub state: TileState,
}

impl TileSnapshot {
    fn from_cell(cell: Cell) -> Option<Self> {
        cell.map(|t| Self {
            id: t.id.0,
            color: t.color,
            state: t.state,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cells, row 0 first
    pub cells: Vec<Option<TileSnapshot>>,
    pub next_row: Vec<Option<TileSnapshot>>,
    pub score: u32,
    pub pause_frames: u32,
    pub distance_to_next_row: u32,
    pub status: GameStatus,
    pub panic: PanicState,
    /// An animation is outstanding
    pub busy: bool,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.next_row.clear();
        self.score = 0;
        self.pause_frames = 0;
        self.distance_to_next_row = 0;
        self.status = GameStatus::Initializing;
        self.panic = PanicState::None;
        self.busy = false;
        self.seed = 0;
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Cell at (x, y); `None` for empty or out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<TileSnapshot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Refill `cells` from grid cells without reallocating when sizes match
    pub(crate) fn write_cells(&mut self, cells: impl Iterator<Item = Cell>) {
        self.cells.clear();
        self.cells.extend(cells.map(TileSnapshot::from_cell));
    }

    pub(crate) fn write_next_row(&mut self, row: &[Cell]) {
        self.next_row.clear();
        self.next_row
            .extend(row.iter().copied().map(TileSnapshot::from_cell));
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            next_row: Vec::new(),
            score: 0,
            pause_frames: 0,
            distance_to_next_row: 0,
            status: GameStatus::Initializing,
            panic: PanicState::None,
            busy: false,
            seed: 0,
        };
        s.clear();
        s
    }
}
