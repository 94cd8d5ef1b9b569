use serde::{Deserialize, Serialize};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this cell shifted by `(dx, dy)`, without any bounds handling.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Logical board dimensions.
///
/// Pure value type: the board carries no occupancy of its own, callers pass
/// the snake's cells where occupancy matters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }

    /// Returns `cell` wrapped into bounds on both axes.
    #[must_use]
    pub fn wrap(self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(i32::from(self.width)),
            y: cell.y.rem_euclid(i32::from(self.height)),
        }
    }

    /// Centre cell, rounding down on even dimensions.
    #[must_use]
    pub fn center(self) -> Cell {
        Cell {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, GridSize};

    #[test]
    fn wrapping_keeps_coordinates_inside_bounds() {
        let grid = GridSize::new(10, 8);

        assert_eq!(grid.wrap(Cell::new(-1, 3)), Cell::new(9, 3));
        assert_eq!(grid.wrap(Cell::new(4, 8)), Cell::new(4, 0));
        assert_eq!(grid.wrap(Cell::new(10, -1)), Cell::new(0, 7));
        assert_eq!(grid.wrap(Cell::new(3, 3)), Cell::new(3, 3));
    }

    #[test]
    fn bounds_check_is_half_open() {
        let grid = GridSize::new(10, 8);

        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(9, 7)));
        assert!(!grid.contains(Cell::new(10, 7)));
        assert!(!grid.contains(Cell::new(9, 8)));
        assert!(!grid.contains(Cell::new(-1, 0)));
    }

    #[test]
    fn center_rounds_down() {
        assert_eq!(GridSize::new(10, 10).center(), Cell::new(5, 5));
        assert_eq!(GridSize::new(50, 30).center(), Cell::new(25, 15));
        assert_eq!(GridSize::new(7, 3).center(), Cell::new(3, 1));
        assert_eq!(GridSize::new(7, 3).total_cells(), 21);
    }
}
