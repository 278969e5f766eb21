//! Tilerise (workspace facade crate).
//!
//! This package exposes `tilerise::{core,runtime,types}` while the implementation lives in
//! dedicated crates under `crates/`, plus the pieces the demo binary is built from.

pub mod autoplay;
pub mod cli;
pub mod view;

pub use tilerise_core as core;
pub use tilerise_runtime as runtime;
pub use tilerise_types as types;
