//! Protocol module - JSON line messages published by a session
//!
//! Every message serializes to a single JSON object tagged by `"type"`:
//!
//! ```text
//! {"type":"start","seed":7,"width":6,"height":12,"speed_ms":60,"starting_rows":5,"headless":false}
//! {"type":"animate","id":3,"animation":{"kind":"break","tiles":[...]}}
//! {"type":"matched","tiles":3,"score":3,"pause_frames":800}
//! {"type":"lost","score":42}
//! ```
//!
//! Core types are mirrored by lowercase wire types so the core crate stays free of serde.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::core::{AnimationKind, AnimationRequest, Fall, GameEvent, GameSnapshot, PlacedTile};
use crate::types::{GameStatus, PanicState, Tile, TileColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorLower {
    Red,
    Blue,
    Green,
    Yellow,
}

impl From<TileColor> for ColorLower {
    fn from(value: TileColor) -> Self {
        match value {
            TileColor::Red => Self::Red,
            TileColor::Blue => Self::Blue,
            TileColor::Green => Self::Green,
            TileColor::Yellow => Self::Yellow,
        }
    }
}

impl ColorLower {
    /// One-letter board glyph
    pub fn glyph(&self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicLower {
    None,
    Panic,
    SuperPanic,
}

impl From<PanicState> for PanicLower {
    fn from(value: PanicState) -> Self {
        match value {
            PanicState::None => Self::None,
            PanicState::Panic => Self::Panic,
            PanicState::SuperPanic => Self::SuperPanic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLower {
    Initializing,
    Running,
    Paused,
    GameOver,
}

impl From<GameStatus> for StatusLower {
    fn from(value: GameStatus) -> Self {
        match value {
            GameStatus::Initializing => Self::Initializing,
            GameStatus::Running => Self::Running,
            GameStatus::Paused => Self::Paused,
            GameStatus::GameOver => Self::GameOver,
        }
    }
}

/// A tile at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWire {
    pub id: u32,
    pub color: ColorLower,
    pub x: usize,
    pub y: usize,
}

impl TileWire {
    fn at(tile: Tile, (x, y): (usize, usize)) -> Self {
        Self {
            id: tile.id.0,
            color: tile.color.into(),
            x,
            y,
        }
    }
}

impl From<PlacedTile> for TileWire {
    fn from(value: PlacedTile) -> Self {
        Self::at(value.tile, (value.x, value.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallWire {
    pub id: u32,
    pub from: [usize; 2],
    pub to: [usize; 2],
}

impl From<Fall> for FallWire {
    fn from(value: Fall) -> Self {
        Self {
            id: value.id.0,
            from: [value.from.0, value.from.1],
            to: [value.to.0, value.to.1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationWire {
    Swap {
        origin: TileWire,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<TileWire>,
        to: [usize; 2],
    },
    Break {
        tiles: Vec<TileWire>,
    },
    Fall {
        falls: Vec<FallWire>,
    },
}

impl From<&AnimationKind> for AnimationWire {
    fn from(value: &AnimationKind) -> Self {
        match value {
            AnimationKind::Swap { origin, target, to } => Self::Swap {
                origin: (*origin).into(),
                target: target.map(|t| TileWire::at(t, *to)),
                to: [to.0, to.1],
            },
            AnimationKind::Break { tiles } => Self::Break {
                tiles: tiles.iter().copied().map(TileWire::from).collect(),
            },
            AnimationKind::Fall { falls } => Self::Fall {
                falls: falls.iter().copied().map(FallWire::from).collect(),
            },
        }
    }
}

/// One outbound line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    Start {
        seed: u32,
        width: u8,
        height: u8,
        speed_ms: u32,
        starting_rows: u8,
        headless: bool,
    },
    Moved {
        offset: u32,
    },
    RowAdded,
    Matched {
        tiles: usize,
        score: u32,
        pause_frames: u32,
    },
    Panic {
        state: PanicLower,
    },
    Animate {
        id: u32,
        animation: AnimationWire,
    },
    Lost {
        score: u32,
    },
    Snapshot {
        status: StatusLower,
        score: u32,
        pause_frames: u32,
        distance_to_next_row: u32,
        panic: PanicLower,
        busy: bool,
        /// One string per row, top first; `.` is an empty cell
        board: Vec<String>,
        next_row: String,
    },
    Finished {
        score: u32,
        ticks: u64,
        seed: u32,
    },
}

impl WireMessage {
    pub fn start(config: &SessionConfig) -> Self {
        Self::Start {
            seed: config.seed,
            width: config.settings.width,
            height: config.settings.height,
            speed_ms: config.settings.speed_ms,
            starting_rows: config.settings.starting_rows,
            headless: config.headless,
        }
    }

    pub fn snapshot(snap: &GameSnapshot) -> Self {
        let board = (0..snap.height)
            .map(|y| board_line((0..snap.width).map(|x| snap.cell(x, y).map(|t| t.color))))
            .collect();
        let next_row = board_line(snap.next_row.iter().map(|c| c.map(|t| t.color)));

        Self::Snapshot {
            status: snap.status.into(),
            score: snap.score,
            pause_frames: snap.pause_frames,
            distance_to_next_row: snap.distance_to_next_row,
            panic: snap.panic.into(),
            busy: snap.busy,
            board,
            next_row,
        }
    }

    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&AnimationRequest> for WireMessage {
    fn from(value: &AnimationRequest) -> Self {
        Self::Animate {
            id: value.id.0,
            animation: (&value.kind).into(),
        }
    }
}

impl From<&GameEvent> for WireMessage {
    fn from(value: &GameEvent) -> Self {
        match value {
            GameEvent::Moved { offset } => Self::Moved { offset: *offset },
            GameEvent::RowAdded => Self::RowAdded,
            GameEvent::Matched {
                tiles,
                score,
                pause_frames,
            } => Self::Matched {
                tiles: *tiles,
                score: *score,
                pause_frames: *pause_frames,
            },
            GameEvent::PanicChanged(state) => Self::Panic {
                state: (*state).into(),
            },
            GameEvent::Animate(request) => request.into(),
            GameEvent::Lost { score } => Self::Lost { score: *score },
        }
    }
}

fn board_line(cells: impl Iterator<Item = Option<TileColor>>) -> String {
    cells
        .map(|c| c.map(|color| ColorLower::from(color).glyph()).unwrap_or('.'))
        .collect()
}
