//! Runtime module - real-time driver for a game
//!
//! The core engine is synchronous and never touches a clock. This crate gives it one:
//! a [`Session`] spawns a tokio task that owns the engine and
//!
//! 1. **Paces**: calls `tick()` on an interval of `speed_ms`
//! 2. **Serializes input**: swaps, pause toggles and animation completions arrive on one
//!    bounded channel and are applied in order
//! 3. **Guards the gate**: a completion that never arrives is forced after
//!    `animation_timeout` and logged
//! 4. **Publishes**: engine events go out on an unbounded channel, the latest
//!    [`GameSnapshot`](crate::core::GameSnapshot) on a watch channel
//!
//! # Environment Variables
//!
//! - `TILERISE_WIDTH` / `TILERISE_HEIGHT`: grid size (default 6 x 12)
//! - `TILERISE_SPEED`: preset label (`slowest`..`fastest`) or tick interval in ms
//! - `TILERISE_DIFFICULTY`: preset label (`beginner`..`impossible`) or starting rows
//! - `TILERISE_SEED`: row generator seed (default: clock)
//! - `TILERISE_HEADLESS`: `1`/`true` resolves animations inline
//! - `TILERISE_ANIMATION_TIMEOUT_MS`: completion timeout (default 2000)
//!
//! # Wire Format
//!
//! [`protocol::WireMessage`] renders events and snapshots as line-delimited JSON tagged
//! by `"type"`.

pub mod config;
pub mod protocol;
pub mod session;

pub use tilerise_core as core;
pub use tilerise_types as types;

pub use config::SessionConfig;
pub use protocol::WireMessage;
pub use session::{Session, SessionCommand, SessionOutput, SessionSummary};
