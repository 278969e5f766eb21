//! Outbound events
//!
//! The engine appends events to an outbox; a presentation layer drains it with
//! [`GameState::drain_events`](crate::GameState::drain_events) and never has to be known to the core.

use crate::animation::AnimationRequest;
use crate::types::PanicState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The stack travelled; `offset` is the distance covered since the last row
    Moved { offset: u32 },
    /// A row entered at the bottom
    RowAdded,
    /// A match resolved
    Matched {
        tiles: usize,
        score: u32,
        pause_frames: u32,
    },
    /// The danger tier changed
    PanicChanged(PanicState),
    /// An animation must be played; see [`AnimationRequest`]
    Animate(AnimationRequest),
    /// Terminal: the game is over with this final score
    Lost { score: u32 },
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Moved { .. } => "moved",
            GameEvent::RowAdded => "row_added",
            GameEvent::Matched { .. } => "matched",
            GameEvent::PanicChanged(_) => "panic_changed",
            GameEvent::Animate(_) => "animate",
            GameEvent::Lost { .. } => "lost",
        }
    }
}
