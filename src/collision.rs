use serde::{Deserialize, Serialize};

use crate::grid::{Cell, GridSize};
use crate::snake::Snake;

/// Rule applied when the head leaves the board.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Re-enter from the opposite edge.
    Wrap,
    /// Leaving the board ends the game.
    #[default]
    Wall,
}

impl BoundaryPolicy {
    /// Maps a raw head cell onto the board, or `None` when the move is fatal.
    #[must_use]
    pub fn resolve(self, cell: Cell, bounds: GridSize) -> Option<Cell> {
        if bounds.contains(cell) {
            return Some(cell);
        }

        match self {
            Self::Wrap => Some(bounds.wrap(cell)),
            Self::Wall => None,
        }
    }
}

/// Why a game ended in a collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    SelfCollision,
    Wall,
}

/// Returns true when `new_head` lands on a body cell.
///
/// The tail cell only counts while `growing`; otherwise it is vacated during
/// the same tick the head arrives.
#[must_use]
pub fn self_collision(new_head: Cell, snake: &Snake, growing: bool) -> bool {
    let checked = if growing { snake.len() } else { snake.len() - 1 };
    snake
        .segments()
        .take(checked)
        .any(|segment| segment.cell == new_head)
}

/// Resolves the boundary policy and checks the body in one go.
pub fn check(
    raw_head: Cell,
    snake: &Snake,
    growing: bool,
    policy: BoundaryPolicy,
    bounds: GridSize,
) -> Result<Cell, CollisionKind> {
    let new_head = policy.resolve(raw_head, bounds).ok_or(CollisionKind::Wall)?;
    if self_collision(new_head, snake, growing) {
        return Err(CollisionKind::SelfCollision);
    }
    Ok(new_head)
}
