use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the warehouse grid, addressed row-first from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(9, 0).to_string(), "(9, 0)");
        assert_eq!(Cell::new(0, 5).to_string(), "(0, 5)");
    }

    #[test]
    fn test_cell_equality() {
        assert_eq!(Cell::new(3, 7), Cell::new(3, 7));
        assert_ne!(Cell::new(3, 7), Cell::new(7, 3));
    }
}
