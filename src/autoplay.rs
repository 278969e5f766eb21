//! Scripted player for the demo binary.
//!
//! Looks at a snapshot and prefers a swap that lines up three tiles of one color;
//! otherwise it swaps a random idle tile.

use crate::core::{GameSnapshot, SimpleRng};
use crate::runtime::SessionCommand;
use crate::types::{Direction, TileColor, TileState, MIN_RUN};

const DIRECTIONS: [Direction; 2] = [Direction::Left, Direction::Right];

pub struct AutoPlayer {
    rng: SimpleRng,
}

impl AutoPlayer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed ^ 0x9e37_79b9),
        }
    }

    /// Pick the next swap, or `None` when the game is not accepting one.
    pub fn pick(&mut self, snap: &GameSnapshot) -> Option<SessionCommand> {
        if !snap.playable() || snap.busy {
            return None;
        }

        let idle: Vec<(usize, usize)> = (0..snap.height)
            .flat_map(|y| (0..snap.width).map(move |x| (x, y)))
            .filter(|&(x, y)| is_idle(snap, x, y))
            .collect();
        if idle.is_empty() {
            return None;
        }

        // Scan from a random start so equal candidates are not always taken top-left.
        let start = self.rng.next_range(idle.len() as u32) as usize;
        for offset in 0..idle.len() {
            let (x, y) = idle[(start + offset) % idle.len()];
            for dir in DIRECTIONS {
                if lines_up(snap, x, y, dir) {
                    return Some(SessionCommand::SwapAt { x, y, dir });
                }
            }
        }

        let (x, y) = idle[start];
        let dir = DIRECTIONS[self.rng.next_range(2) as usize];
        Some(SessionCommand::SwapAt { x, y, dir })
    }
}

fn is_idle(snap: &GameSnapshot, x: usize, y: usize) -> bool {
    snap.cell(x, y).is_some_and(|t| t.state == TileState::Idle)
}

fn color(snap: &GameSnapshot, x: usize, y: usize) -> Option<TileColor> {
    snap.cell(x, y).map(|t| t.color)
}

/// Whether swapping (x, y) towards `dir` puts a run of `MIN_RUN` next to either cell.
fn lines_up(snap: &GameSnapshot, x: usize, y: usize, dir: Direction) -> bool {
    let Some(tx) = dir.apply(x).filter(|&tx| tx < snap.width) else {
        return false;
    };
    if snap.cell(tx, y).is_some_and(|t| t.state != TileState::Idle) {
        return false;
    }

    let swapped = |cx: usize, cy: usize| -> Option<TileColor> {
        match (cx, cy) {
            _ if cy != y => color(snap, cx, cy),
            _ if cx == x => color(snap, tx, y),
            _ if cx == tx => color(snap, x, y),
            _ => color(snap, cx, cy),
        }
    };

    [(tx, y), (x, y)].into_iter().any(|(cx, cy)| {
        let Some(c) = swapped(cx, cy) else {
            return false;
        };
        let run = |dx: isize, dy: isize| {
            let mut n = 0;
            let (mut px, mut py) = (cx as isize + dx, cy as isize + dy);
            while px >= 0
                && py >= 0
                && (px as usize) < snap.width
                && (py as usize) < snap.height
                && swapped(px as usize, py as usize) == Some(c)
            {
                n += 1;
                px += dx;
                py += dy;
            }
            n
        };
        1 + run(-1, 0) + run(1, 0) >= MIN_RUN || 1 + run(0, -1) + run(0, 1) >= MIN_RUN
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, Grid};
    use crate::types::{GameSettings, Tile, TileColor::*};

    #[test]
    fn test_prefers_a_lining_swap() {
        let row = vec![
            Some(Tile::new(1, Red)),
            Some(Tile::new(2, Red)),
            Some(Tile::new(3, Blue)),
            Some(Tile::new(4, Red)),
        ];
        let grid = Grid::from_rows(vec![vec![None; 4], row]);
        let settings = GameSettings {
            width: 4,
            height: 2,
            speed_ms: 60,
            starting_rows: 0,
        };
        let game = GameState::from_grid(settings, grid, 1).unwrap();

        for seed in 0..8 {
            let mut player = AutoPlayer::new(seed);
            match player.pick(&game.snapshot()) {
                Some(SessionCommand::SwapAt { x, y: 1, dir }) => {
                    let pair = (x, dir);
                    assert!(
                        pair == (2, Direction::Right) || pair == (3, Direction::Left),
                        "seed {} picked {:?}",
                        seed,
                        pair
                    );
                }
                other => panic!("unexpected pick {:?}", other),
            }
        }
    }
}
