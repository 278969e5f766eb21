//! Terminal board view for `--watch`.
//!
//! Frames are encoded into a byte buffer with crossterm commands and written in one go.
//! Every frame is a full redraw; boards are small.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{GameSnapshot, TileSnapshot};
use crate::types::{PanicState, TileColor, TileState};

pub struct BoardView {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()
    }

    pub fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.buf.clear();
        encode_into(snap, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one frame: header, board, the incoming row (dimmed), status line.
pub fn encode_into(snap: &GameSnapshot, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!(
        "score {:>6}  pause {:>5}  row in {:>3}\r\n",
        snap.score, snap.pause_frames, snap.distance_to_next_row
    )))?;

    for y in 0..snap.height {
        for x in 0..snap.width {
            encode_cell(snap.cell(x, y), false, out)?;
        }
        out.queue(Print("\r\n"))?;
    }
    for cell in &snap.next_row {
        encode_cell(*cell, true, out)?;
    }
    out.queue(Print("\r\n"))?;

    let panic = match snap.panic {
        PanicState::None => "",
        PanicState::Panic => "  PANIC",
        PanicState::SuperPanic => "  SUPER PANIC",
    };
    out.queue(Print(format!("{}{}\r\n", snap.status.as_str(), panic)))?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_cell(cell: Option<TileSnapshot>, preview: bool, out: &mut Vec<u8>) -> Result<()> {
    let Some(tile) = cell else {
        out.queue(Print(" ."))?;
        return Ok(());
    };

    out.queue(SetForegroundColor(tile_color(tile.color)))?;
    if preview || tile.state != TileState::Idle {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    out.queue(Print("██"))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn tile_color(color: TileColor) -> Color {
    match color {
        TileColor::Red => Color::Red,
        TileColor::Blue => Color::Blue,
        TileColor::Green => Color::Green,
        TileColor::Yellow => Color::Yellow,
    }
}
