//! Grid coordinates and bounds checks.

use serde::{Deserialize, Serialize};

/// A `(row, col)` cell in a `rows x cols` grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index in a grid with `cols` columns.
    #[must_use]
    pub const fn to_index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [`Position::to_index`].
    #[must_use]
    pub const fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }

    /// Is this position inside a `rows x cols` grid?
    #[must_use]
    pub const fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let cols = 7;
        for index in 0..49 {
            let pos = Position::from_index(index, cols);
            assert_eq!(pos.to_index(cols), index);
        }
        assert_eq!(Position::new(2, 3).to_index(7), 17);
    }

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(0, 0).in_bounds(1, 1));
        assert!(Position::new(3, 3).in_bounds(4, 4));
        assert!(!Position::new(4, 0).in_bounds(4, 4));
        assert!(!Position::new(0, 4).in_bounds(4, 4));
        assert!(!Position::new(0, 0).in_bounds(0, 4));
    }
}
