use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::input::{direction_change_is_valid, Direction};

/// One body cell plus the direction the snake was moving when it was placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(flatten)]
    pub cell: Cell,
    pub direction: Direction,
}

/// Mutable snake state and movement buffering behavior.
///
/// The body is stored head-first in a `VecDeque`, so a tick is one
/// `push_front` plus at most one `pop_back` on storage that is reused across
/// ticks.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Segment>,
    direction: Direction,
    pending_direction: Option<Direction>,
    grow: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self::with_length(start, direction, 1)
    }

    /// Creates a straight snake of `length` cells with its head at `head`,
    /// the body trailing opposite to `direction`.
    ///
    /// A zero `length` is treated as one.
    #[must_use]
    pub fn with_length(head: Cell, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite().delta();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_back(Segment { cell, direction });
            cell = cell.offset(behind);
        }

        Self {
            body,
            direction,
            pending_direction: None,
            grow: false,
        }
    }

    /// Creates a snake from explicit body cells (front is head).
    ///
    /// Every segment is tagged with `direction`.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    #[must_use]
    pub fn from_segments(cells: Vec<Cell>, direction: Direction) -> Self {
        assert!(!cells.is_empty(), "snake needs at least one segment");

        Self {
            body: cells
                .into_iter()
                .map(|cell| Segment { cell, direction })
                .collect(),
            direction,
            pending_direction: None,
            grow: false,
        }
    }

    /// Stores `direction` as the pending turn for the next tick.
    ///
    /// A direct reversal of the committed direction is dropped and leaves any
    /// earlier pending turn in place. Returns whether the input was accepted.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            log::trace!("dropping reversal {direction:?} while moving {:?}", self.direction);
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Promotes the pending turn, if any, to the committed direction.
    pub fn commit_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Direction the next tick will move in: the pending turn if any, else the
    /// committed direction.
    #[must_use]
    pub fn upcoming_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    /// Returns the unresolved head cell one step along [`Self::upcoming_direction`].
    #[must_use]
    pub fn next_head(&self) -> Cell {
        self.head().offset(self.upcoming_direction().delta())
    }

    /// Prepends `new_head` and drops the tail unless growth is pending.
    pub fn advance(&mut self, new_head: Cell) {
        self.body.push_front(Segment {
            cell: new_head,
            direction: self.direction,
        });
        if !self.grow {
            let _ = self.body.pop_back();
        }
        self.grow = false;
    }

    /// Marks the snake to keep its tail on the next `advance`.
    pub fn set_growth(&mut self) {
        self.grow = true;
    }

    #[must_use]
    pub fn is_growing(&self) -> bool {
        self.grow
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body
            .front()
            .expect("snake body must always contain at least one segment")
            .cell
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body
            .back()
            .expect("snake body must always contain at least one segment")
            .cell
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.iter().any(|segment| segment.cell == cell)
    }

    /// Collects every occupied cell.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().map(|segment| segment.cell).collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Cell;
    use crate::input::Direction;

    use super::Snake;

    #[test]
    fn initial_body_trails_behind_the_head() {
        let snake = Snake::with_length(Cell::new(5, 5), Direction::Right, 3);

        let cells: Vec<Cell> = snake.segments().map(|segment| segment.cell).collect();
        assert_eq!(cells, vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        let next = snake.next_head();
        snake.advance(next);

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_previous_tail_once() {
        let mut snake = Snake::with_length(Cell::new(5, 5), Direction::Right, 2);

        snake.set_growth();
        snake.advance(snake.next_head());
        assert_eq!(snake.len(), 3);
        assert!(!snake.is_growing());

        snake.advance(snake.next_head());
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn queue_rejects_reverse() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Up);

        assert!(!snake.queue_direction(Direction::Down));
        snake.commit_pending_direction();
        snake.advance(snake.next_head());

        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.head(), Cell::new(5, 4));
    }

    #[test]
    fn last_valid_input_before_commit_wins() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Down);

        assert!(snake.queue_direction(Direction::Right));
        assert!(snake.queue_direction(Direction::Left));
        snake.commit_pending_direction();

        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn rejected_reversal_keeps_earlier_pending_turn() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Down);

        snake.queue_direction(Direction::Right);
        snake.queue_direction(Direction::Up);

        assert_eq!(snake.pending_direction(), Some(Direction::Right));
    }

    #[test]
    fn next_head_looks_ahead_through_pending_turn() {
        let mut snake = Snake::with_length(Cell::new(5, 5), Direction::Right, 3);

        snake.queue_direction(Direction::Up);

        assert_eq!(snake.upcoming_direction(), Direction::Up);
        assert_eq!(snake.next_head(), Cell::new(5, 4));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn new_head_segment_records_committed_direction() {
        let mut snake = Snake::with_length(Cell::new(5, 5), Direction::Right, 2);

        snake.queue_direction(Direction::Down);
        snake.commit_pending_direction();
        snake.advance(snake.next_head());

        let head = snake.segments().next().copied();
        assert_eq!(head.map(|segment| segment.direction), Some(Direction::Down));
        assert_eq!(snake.head(), Cell::new(5, 6));
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(!snake.occupies(Cell::new(4, 5)));
    }
}
