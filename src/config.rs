use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collision::BoundaryPolicy;
use crate::error::{ConfigError, EngineError};
use crate::food::FoodKind;
use crate::grid::GridSize;
use crate::input::Direction;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 50;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Default rendered cell size; the engine never reads it.
pub const DEFAULT_CELL_SIZE: u16 = 16;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Tick interval reduction per food eaten.
pub const SPEED_STEP_MS: u64 = 5;

/// Score granted per food eaten.
pub const FOOD_REWARD: u32 = 100;

/// Initial snake length.
pub const DEFAULT_SNAKE_LENGTH: usize = 5;

/// Cells kept free of food along every edge.
pub const DEFAULT_FOOD_MARGIN: u16 = 1;

/// Food kinds cycled in order.
pub const DEFAULT_FOOD_KINDS: &[&str] = &["apple", "cherry", "grape", "lemon", "melon"];

/// Construction-time settings for a [`TickEngine`](crate::engine::TickEngine).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    /// Rendering hint only.
    pub cell_size: u16,
    pub initial_tick_interval_ms: u64,
    pub initial_length: usize,
    pub initial_direction: Direction,
    pub boundary: BoundaryPolicy,
    pub food_kinds: Vec<FoodKind>,
    pub food_margin: u16,
    pub food_reward: u32,
    pub speed_step_ms: u64,
    pub min_tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_length: DEFAULT_SNAKE_LENGTH,
            initial_direction: Direction::Right,
            boundary: BoundaryPolicy::Wall,
            food_kinds: DEFAULT_FOOD_KINDS.iter().copied().map(FoodKind::new).collect(),
            food_margin: DEFAULT_FOOD_MARGIN,
            food_reward: FOOD_REWARD,
            speed_step_ms: SPEED_STEP_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file; missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Board dimensions as a [`GridSize`].
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Checks that an engine can be built from these settings.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.cell_size == 0 {
            return Err(invalid("cell_size must be positive"));
        }
        if self.food_kinds.is_empty() {
            return Err(invalid("food_kinds must name at least one kind"));
        }
        if self.initial_length == 0 {
            return Err(invalid("initial_length must be at least 1"));
        }

        let room = self.room_behind_center();
        if self.initial_length > room {
            return Err(invalid(format!(
                "initial_length {} does not fit behind the board centre ({room} cells available)",
                self.initial_length
            )));
        }

        if self.min_tick_interval_ms == 0 {
            return Err(invalid("min_tick_interval_ms must be positive"));
        }
        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(invalid(format!(
                "min_tick_interval_ms {} exceeds initial_tick_interval_ms {}",
                self.min_tick_interval_ms, self.initial_tick_interval_ms
            )));
        }

        Ok(())
    }

    /// Cells from the centre to the edge behind the initial heading, centre included.
    fn room_behind_center(&self) -> usize {
        let center = self.grid().center();
        let cells = match self.initial_direction {
            Direction::Right => center.x + 1,
            Direction::Left => i32::from(self.width) - center.x,
            Direction::Down => center.y + 1,
            Direction::Up => i32::from(self.height) - center.y,
        };
        usize::try_from(cells).unwrap_or(0)
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig(message.into())
}
