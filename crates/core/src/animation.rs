//! Animation contract between the engine and its presentation layer
//!
//! The engine never draws. When a change should be played back (a swap slide, a break,
//! a drop) it emits one [`AnimationRequest`] and holds every grid mutation until the
//! collaborator answers with [`GameState::complete_animation`](crate::GameState::complete_animation)
//! for that request's id. Only one request is outstanding at a time.
//!
//! In [`AnimationMode::Headless`] requests resolve immediately; initialization always
//! runs headless.

use crate::gravity::Fall;
use crate::types::Tile;

/// Identifier of an animation request; strictly increasing per game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u32);

/// How animation requests are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    /// Every request completes inline
    #[default]
    Headless,
    /// Requests wait for an external completion signal
    Deferred,
}

/// A tile together with the cell it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    pub tile: Tile,
    pub x: usize,
    pub y: usize,
}

/// What should be animated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationKind {
    /// Two cells slide past each other; `target` is `None` when sliding into an empty cell
    Swap {
        origin: PlacedTile,
        target: Option<Tile>,
        to: (usize, usize),
    },
    /// Matched tiles shrink away
    Break { tiles: Vec<PlacedTile> },
    /// Tiles drop to their resting cells
    Fall { falls: Vec<Fall> },
}

impl AnimationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationKind::Swap { .. } => "swap",
            AnimationKind::Break { .. } => "break",
            AnimationKind::Fall { .. } => "fall",
        }
    }
}

/// One outstanding animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationRequest {
    pub id: AnimationId,
    pub kind: AnimationKind,
}
