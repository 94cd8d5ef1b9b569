use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::collision::{self, CollisionKind};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::food::{FoodItem, FoodSpawner};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::snake::{Segment, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    /// The snake hit itself or a wall. Terminal.
    Collided,
    /// No free cell was left for the next food. Terminal.
    Victory,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// Everything a renderer needs to draw one tick.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Head first.
    pub segments: Vec<Segment>,
    pub food: Option<FoodItem>,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub status: GameStatus,
    pub tick: u64,
}

/// Owns all mutable game state and advances it one tick at a time.
#[derive(Debug, Clone)]
pub struct TickEngine {
    config: EngineConfig,
    bounds: GridSize,
    snake: Snake,
    food: Option<FoodItem>,
    spawner: FoodSpawner,
    score: u32,
    tick_interval_ms: u64,
    tick_count: u64,
    status: GameStatus,
    collision: Option<CollisionKind>,
}

impl TickEngine {
    /// Validates `config` and builds the initial state with the first food placed.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let bounds = config.grid();
        let spawner = FoodSpawner::new(bounds, config.food_margin, config.food_kinds.clone(), rng);
        let snake = initial_snake(&config);

        let mut engine = Self {
            bounds,
            snake,
            food: None,
            spawner,
            score: 0,
            tick_interval_ms: config.initial_tick_interval_ms,
            tick_count: 0,
            status: GameStatus::Running,
            collision: None,
            config,
        };
        engine.food = Some(engine.spawner.place(&engine.snake.occupied_cells())?);

        log::info!(
            "engine ready: {}x{} board, {:?} boundary, snake length {}",
            engine.bounds.width(),
            engine.bounds.height(),
            engine.config.boundary,
            engine.snake.len()
        );
        Ok(engine)
    }

    /// Restores the initial state from the stored config.
    ///
    /// The random stream continues, so consecutive games place food differently.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.snake = initial_snake(&self.config);
        self.spawner.reset_kind();
        self.score = 0;
        self.tick_interval_ms = self.config.initial_tick_interval_ms;
        self.tick_count = 0;
        self.status = GameStatus::Running;
        self.collision = None;
        self.food = Some(self.spawner.place(&self.snake.occupied_cells())?);
        Ok(())
    }

    /// Queues a turn for the next tick. Reversals are dropped; returns whether
    /// the input was accepted.
    pub fn set_intended_direction(&mut self, direction: Direction) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.snake.queue_direction(direction)
    }

    /// Advances the simulation by one tick and returns the resulting snapshot.
    ///
    /// Once the game is over the state is frozen and every call returns the
    /// same snapshot.
    pub fn step(&mut self) -> Snapshot {
        if self.status.is_terminal() {
            return self.snapshot();
        }

        self.tick_count += 1;

        // The snake is only mutated once the move is known to be legal, so a
        // collision freezes it exactly as it was at the end of the last tick.
        let raw_head = self.snake.next_head();
        let eats = self
            .config
            .boundary
            .resolve(raw_head, self.bounds)
            .is_some_and(|cell| self.food.as_ref().is_some_and(|food| food.cell == cell));
        let growing = eats || self.snake.is_growing();

        let new_head = match collision::check(
            raw_head,
            &self.snake,
            growing,
            self.config.boundary,
            self.bounds,
        ) {
            Ok(cell) => cell,
            Err(kind) => {
                self.status = GameStatus::Collided;
                self.collision = Some(kind);
                log::info!(
                    "collision ({kind:?}) at tick {} with score {}",
                    self.tick_count,
                    self.score
                );
                return self.snapshot();
            }
        };

        self.snake.commit_pending_direction();
        if eats {
            self.snake.set_growth();
        }
        self.snake.advance(new_head);

        if eats {
            self.consume_food();
        }

        self.snapshot()
    }

    fn consume_food(&mut self) {
        self.score = self.score.saturating_add(self.config.food_reward);
        self.tick_interval_ms = self
            .tick_interval_ms
            .saturating_sub(self.config.speed_step_ms)
            .max(self.config.min_tick_interval_ms);
        self.spawner.advance_kind();

        log::debug!(
            "food eaten at tick {}: score {}, length {}, interval {}ms",
            self.tick_count,
            self.score,
            self.snake.len(),
            self.tick_interval_ms
        );

        match self.spawner.place(&self.snake.occupied_cells()) {
            Ok(food) => self.food = Some(food),
            Err(error) => {
                log::info!("{error}; board is full at length {}", self.snake.len());
                self.food = None;
                self.status = GameStatus::Victory;
            }
        }
    }

    /// Replaces the active food with one at `cell`, keeping the current kind.
    pub fn place_food_at(&mut self, cell: Cell) -> Result<(), EngineError> {
        if !self.bounds.contains(cell) {
            return Err(EngineError::CellOutOfBounds(cell));
        }
        if self.snake.occupies(cell) {
            return Err(EngineError::CellOccupied(cell));
        }

        self.food = Some(FoodItem {
            cell,
            kind: self.spawner.current_kind().clone(),
        });
        Ok(())
    }

    /// Captures the current state without advancing it.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().copied().collect(),
            food: self.food.clone(),
            score: self.score,
            tick_interval_ms: self.tick_interval_ms,
            status: self.status,
            tick: self.tick_count,
        }
    }

    /// Delay the external clock should wait before the next `step`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// What ended the game, when it ended in a collision.
    #[must_use]
    pub fn collision(&self) -> Option<CollisionKind> {
        self.collision
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<&FoodItem> {
        self.food.as_ref()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn initial_snake(config: &EngineConfig) -> Snake {
    Snake::with_length(
        config.grid().center(),
        config.initial_direction,
        config.initial_length,
    )
}
