//! RNG module - seeded row generation
//!
//! Rows are generated one ahead of time so the UI can preview the row that will
//! enter next. Within a generated row no two horizontally adjacent tiles share a
//! color: slot 0 is sampled freely, every later slot is resampled until it differs
//! from its left neighbour.
//!
//! Also provides a simple LCG so whole games are reproducible from a seed.

use crate::types::{Cell, Row, Tile, TileColor, TileId};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Uniformly sample one of the tile colors
    pub fn next_color(&mut self) -> TileColor {
        let i = self.next_range(TileColor::ALL.len() as u32) as usize;
        TileColor::ALL[i]
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Row generator with a one-row preview
#[derive(Debug, Clone)]
pub struct RowGenerator {
    width: usize,
    rng: SimpleRng,
    /// Next id handed out; ids are never reused
    next_id: u32,
    preview: Row,
}

impl RowGenerator {
    /// Create a generator and pre-generate the first preview row
    pub fn new(width: usize, seed: u32) -> Self {
        Self::starting_at(width, seed, 1)
    }

    /// Create a generator whose ids start at `first_id`
    ///
    /// Used when tiles already exist (fixtures) so new ids never collide with them.
    pub fn starting_at(width: usize, seed: u32, first_id: u32) -> Self {
        let mut generator = Self {
            width,
            rng: SimpleRng::new(seed),
            next_id: first_id,
            preview: Vec::new(),
        };
        generator.preview = generator.generate();
        generator
    }

    /// Generate a fresh row without touching the preview
    fn generate(&mut self) -> Row {
        let mut row: Row = Vec::with_capacity(self.width);
        let mut left: Option<TileColor> = None;

        for _ in 0..self.width {
            let mut color = self.rng.next_color();
            while Some(color) == left {
                color = self.rng.next_color();
            }
            left = Some(color);
            row.push(Some(Tile::new(self.next_id, color)));
            self.next_id += 1;
        }

        row
    }

    /// Peek at the row that the next `draw` returns
    pub fn preview(&self) -> &[Cell] {
        &self.preview
    }

    /// Take the previewed row and generate the next preview
    pub fn draw(&mut self) -> Row {
        let next = self.generate();
        std::mem::replace(&mut self.preview, next)
    }

    /// Id the next generated tile will receive
    pub fn next_id(&self) -> TileId {
        TileId(self.next_id)
    }

    /// Current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
