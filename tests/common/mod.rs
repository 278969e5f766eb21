//! Shared fixtures for the integration tests

#![allow(dead_code)]

use tilerise::core::Grid;
use tilerise::types::{Cell, GameSettings, Tile, TileColor};

pub fn color(glyph: char) -> Option<TileColor> {
    match glyph {
        'R' => Some(TileColor::Red),
        'B' => Some(TileColor::Blue),
        'G' => Some(TileColor::Green),
        'Y' => Some(TileColor::Yellow),
        _ => None,
    }
}

/// Build a grid from glyph rows (`R`, `B`, `G`, `Y`, `.` for empty), row 0 first.
/// Ids are handed out from 1 in reading order.
pub fn grid_from(rows: &[&str]) -> Grid {
    let mut next_id = 1u32;
    let rows = rows
        .iter()
        .map(|row| {
            row.chars()
                .map(|glyph| {
                    color(glyph).map(|c| {
                        let tile = Tile::new(next_id, c);
                        next_id += 1;
                        tile
                    })
                })
                .collect::<Vec<Cell>>()
        })
        .collect();
    Grid::from_rows(rows)
}

/// Glyph rows of the grid's current layout
pub fn glyphs(grid: &Grid) -> Vec<String> {
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| match grid.get(x, y).map(|t| t.color) {
                    Some(TileColor::Red) => 'R',
                    Some(TileColor::Blue) => 'B',
                    Some(TileColor::Green) => 'G',
                    Some(TileColor::Yellow) => 'Y',
                    None => '.',
                })
                .collect()
        })
        .collect()
}

/// Settings sized to `grid`
pub fn settings_for(grid: &Grid, starting_rows: u8) -> GameSettings {
    GameSettings {
        width: grid.width() as u8,
        height: grid.height() as u8,
        speed_ms: 60,
        starting_rows,
    }
}
