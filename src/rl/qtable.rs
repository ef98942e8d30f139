//! Dense action-value table for tabular Q-learning

use crate::grid::{Action, Cell};
use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

/// Action-value table over a fixed grid
///
/// Stores one `f64` estimate per (cell, action) pair in a dense
/// rows x cols x actions array. The table is created zero-filled and never
/// resized; training mutates it one entry at a time through
/// [`set`](Self::set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Array3<f64>,
}

impl QTable {
    /// Create a zero-initialized table for a rows x cols grid.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            values: Array3::zeros((rows, cols, Action::ALL.len())),
        }
    }

    pub fn rows(&self) -> usize {
        self.values.dim().0
    }

    pub fn cols(&self) -> usize {
        self.values.dim().1
    }

    /// Value estimate for taking `action` at `cell`.
    pub fn get(&self, cell: Cell, action: Action) -> f64 {
        self.values[[cell.row, cell.col, action.index()]]
    }

    /// Overwrite the estimate for (`cell`, `action`).
    pub fn set(&mut self, cell: Cell, action: Action, value: f64) {
        self.values[[cell.row, cell.col, action.index()]] = value;
    }

    /// Highest action value at `cell`, the bootstrap target of the
    /// Q-learning update.
    pub fn max_value(&self, cell: Cell) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.get(cell, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Action with the highest value at `cell`.
    ///
    /// Ties go to the lowest action index, so a freshly zeroed table always
    /// answers [`Action::Up`].
    pub fn greedy_action(&self, cell: Cell) -> Action {
        let mut best = Action::ALL[0];
        let mut best_value = self.get(cell, best);
        for &action in &Action::ALL[1..] {
            let value = self.get(cell, action);
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    /// Per-cell maximum over the action axis, the quantity the heatmap
    /// renders.
    pub fn max_per_cell(&self) -> Array2<f64> {
        self.values.map_axis(Axis(2), |values| {
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        })
    }

    /// Raw value array (rows x cols x actions).
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zeros_dimensions() {
        let table = QTable::zeros(11, 7);
        assert_eq!(table.rows(), 11);
        assert_eq!(table.cols(), 7);
        assert_eq!(table.values().dim(), (11, 7, 4));
        assert!(table.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set() {
        let mut table = QTable::zeros(3, 3);
        let cell = Cell::new(1, 2);
        table.set(cell, Action::Left, -4.5);
        assert_relative_eq!(table.get(cell, Action::Left), -4.5);
        assert_eq!(table.get(cell, Action::Up), 0.0);
        assert_eq!(table.get(Cell::new(2, 1), Action::Left), 0.0);
    }

    #[test]
    fn test_max_value() {
        let mut table = QTable::zeros(2, 2);
        let cell = Cell::new(0, 1);
        table.set(cell, Action::Up, -3.0);
        table.set(cell, Action::Right, 2.0);
        table.set(cell, Action::Down, 7.5);
        table.set(cell, Action::Left, -1.0);
        assert_relative_eq!(table.max_value(cell), 7.5);
        assert_eq!(table.max_value(Cell::new(1, 1)), 0.0);
    }

    #[test]
    fn test_greedy_action_picks_maximum() {
        let mut table = QTable::zeros(2, 2);
        let cell = Cell::new(1, 0);
        table.set(cell, Action::Down, 1.0);
        table.set(cell, Action::Left, 3.0);
        assert_eq!(table.greedy_action(cell), Action::Left);
    }

    #[test]
    fn test_greedy_action_ties_break_to_lowest_index() {
        let table = QTable::zeros(2, 2);
        // All zero: the first action wins.
        assert_eq!(table.greedy_action(Cell::new(0, 0)), Action::Up);

        let mut table = QTable::zeros(2, 2);
        let cell = Cell::new(0, 0);
        table.set(cell, Action::Right, 5.0);
        table.set(cell, Action::Down, 5.0);
        assert_eq!(table.greedy_action(cell), Action::Right);
    }

    #[test]
    fn test_max_per_cell() {
        let mut table = QTable::zeros(2, 3);
        table.set(Cell::new(0, 0), Action::Right, 4.0);
        table.set(Cell::new(0, 0), Action::Down, -9.0);
        table.set(Cell::new(1, 2), Action::Left, -2.0);
        table.set(Cell::new(1, 2), Action::Up, -8.0);

        let max_per_cell = table.max_per_cell();
        assert_eq!(max_per_cell.dim(), (2, 3));
        assert_relative_eq!(max_per_cell[[0, 0]], 4.0);
        assert_relative_eq!(max_per_cell[[1, 2]], 0.0);
        assert_eq!(max_per_cell[[0, 1]], 0.0);
    }
}
