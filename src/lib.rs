//! Grid snake simulation engine.
//!
//! [`TickEngine`] owns the whole game state. An external clock calls
//! [`TickEngine::step`] once per tick, an input adapter calls
//! [`TickEngine::set_intended_direction`], and every step returns a
//! [`Snapshot`] for a renderer to draw.
//!
//! The terminal front-end (`renderer`, `terminal_runtime` and the binary) sits
//! behind the default `tui` feature; with `--no-default-features` the crate is
//! the bare engine.

pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
#[cfg(feature = "tui")]
pub mod renderer;
pub mod shared;
pub mod snake;
#[cfg(feature = "tui")]
pub mod terminal_runtime;

pub use collision::{BoundaryPolicy, CollisionKind};
pub use config::EngineConfig;
pub use engine::{GameStatus, Snapshot, TickEngine};
pub use error::{ConfigError, EngineError};
pub use food::{FoodItem, FoodKind};
pub use grid::{Cell, GridSize};
pub use input::Direction;
pub use shared::SharedEngine;
pub use snake::Segment;
