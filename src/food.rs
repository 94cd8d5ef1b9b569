use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::grid::{Cell, GridSize};

/// Opaque food identifier handed through to the renderer.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodKind(String);

impl FoodKind {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(flatten)]
    pub cell: Cell,
    pub kind: FoodKind,
}

/// Places food on free cells and rotates through the kind catalog.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    bounds: GridSize,
    margin: u16,
    catalog: Vec<FoodKind>,
    kind_index: usize,
    rng: StdRng,
}

impl FoodSpawner {
    /// Creates a spawner over `bounds`, keeping `margin` cells clear of every edge.
    ///
    /// # Panics
    ///
    /// Panics if `catalog` is empty; `EngineConfig::validate` rejects that
    /// before an engine is built.
    #[must_use]
    pub fn new(bounds: GridSize, margin: u16, catalog: Vec<FoodKind>, rng: StdRng) -> Self {
        assert!(!catalog.is_empty(), "food catalog must not be empty");

        Self {
            bounds,
            margin,
            catalog,
            kind_index: 0,
            rng,
        }
    }

    /// Picks a uniformly random free cell inside the margin and tags it with
    /// the current kind.
    pub fn place(&mut self, occupied: &HashSet<Cell>) -> Result<FoodItem, EngineError> {
        let candidates = self.free_cells(occupied);
        if candidates.is_empty() {
            return Err(EngineError::NoSpaceAvailable);
        }

        let index = self.rng.gen_range(0..candidates.len());
        Ok(FoodItem {
            cell: candidates[index],
            kind: self.current_kind().clone(),
        })
    }

    /// Moves to the next kind in the catalog, wrapping at the end.
    pub fn advance_kind(&mut self) {
        self.kind_index = (self.kind_index + 1) % self.catalog.len();
    }

    #[must_use]
    pub fn current_kind(&self) -> &FoodKind {
        &self.catalog[self.kind_index]
    }

    /// Restarts the kind rotation without touching the random stream.
    pub fn reset_kind(&mut self) {
        self.kind_index = 0;
    }

    fn free_cells(&self, occupied: &HashSet<Cell>) -> Vec<Cell> {
        let margin = i32::from(self.margin);
        let width = i32::from(self.bounds.width());
        let height = i32::from(self.bounds.height());

        let mut candidates = Vec::new();
        for y in margin..height - margin {
            for x in margin..width - margin {
                let cell = Cell { x, y };
                if !occupied.contains(&cell) {
                    candidates.push(cell);
                }
            }
        }
        candidates
    }
}
