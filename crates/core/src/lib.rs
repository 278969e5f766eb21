//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of a rising-stack match-3 game: a grid of colored
//! tiles gains a row at the bottom on a timer, the player swaps horizontal neighbours,
//! and runs of three or more break, drop and cascade. It has **no dependencies** on
//! rendering, input devices or I/O, making it:
//!
//! - **Deterministic**: Same seed and command sequence produce identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Animation is a contract, not a renderer (see [`animation`])
//!
//! # Module Structure
//!
//! - [`grid`]: width x height tile grid stored as a ring of rows
//! - [`rng`]: seeded row generation with a one-row preview
//! - [`matcher`]: run detection and the breakability rule
//! - [`gravity`]: drop resolution to a fixed point
//! - [`pacing`]: travel distance, pause frames and panic tiers
//! - [`game_state`]: cascade orchestration and the animation gate
//! - [`animation`] / [`events`]: what the engine tells the outside world
//! - [`snapshot`]: allocation-free read model for renderers and observers
//!
//! # Game Rules
//!
//! - **Breakable**: a tile may only take part in a match if every cell below it down
//!   to the floor is occupied; tiles resting on a gap never break
//! - **Runs**: three or more idle, same-colored, breakable tiles in a row or column;
//!   crossing runs break together
//! - **Score**: one point per broken tile
//! - **Pause frames**: matches bank frames that hold the rising stack, capped at 5000
//! - **Game over**: a row is due while the top row is still occupied
//!
//! # Example
//!
//! ```
//! use tilerise_core::GameState;
//! use tilerise_types::{Difficulty, Direction, GameSettings, GameSpeed};
//!
//! let settings = GameSettings::new(6, 12, GameSpeed::Normal, Difficulty::Easy);
//! let mut game = GameState::init(settings, 12345).unwrap();
//!
//! // Swap the bottom-left tile with its right neighbour
//! game.swap_at(0, 11, Direction::Right);
//!
//! // Drive the stack
//! for _ in 0..10 {
//!     game.tick();
//! }
//! assert_eq!(game.grid().height(), 12);
//! assert!(!game.game_over());
//! ```

pub mod animation;
pub mod error;
pub mod events;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod pacing;
pub mod rng;
pub mod snapshot;

pub use tilerise_types as types;

// Re-export commonly used types for convenience
pub use animation::{AnimationId, AnimationKind, AnimationMode, AnimationRequest, PlacedTile};
pub use error::SettingsError;
pub use events::GameEvent;
pub use game_state::GameState;
pub use gravity::Fall;
pub use grid::Grid;
pub use matcher::{find_match, is_breakable, MatchSet};
pub use pacing::{Pacer, Travel};
pub use rng::{RowGenerator, SimpleRng};
pub use snapshot::{GameSnapshot, TileSnapshot};
