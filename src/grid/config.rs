use super::cell::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the warehouse grid
///
/// The grid is described by its dimensions, the set of open aisle cells, and
/// the rewards a robot collects for entering each kind of cell. Every cell
/// not listed in `aisles` is a shelving (wall) cell. Terminality is derived
/// from the reward surface: a cell ends an episode exactly when its reward
/// differs from `step_cost`, which is why the wall and goal rewards must not
/// collide with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Open aisle columns per row; unlisted cells are walls
    pub aisles: BTreeMap<usize, Vec<usize>>,
    /// The single goal cell (item packaging area)
    pub goal: Cell,
    /// Reward for entering a wall cell (terminal)
    pub wall_cost: f64,
    /// Reward for entering an open aisle cell (the per-step cost)
    pub step_cost: f64,
    /// Reward for entering the goal cell (terminal)
    pub goal_reward: f64,
}

impl Default for GridConfig {
    /// The reference 11x11 warehouse: goal at (0, 5), aisles threading
    /// between shelving, rewards -100 / -1 / +100.
    fn default() -> Self {
        Self {
            rows: 11,
            cols: 11,
            aisles: reference_aisles(),
            goal: Cell::new(0, 5),
            wall_cost: -100.0,
            step_cost: -1.0,
            goal_reward: 100.0,
        }
    }
}

impl GridConfig {
    /// Create the default warehouse configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fully open grid with a single goal cell, handy for small
    /// experiments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::grid::{Cell, GridConfig};
    ///
    /// let config = GridConfig::open_grid(4, 4, Cell::new(0, 3));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn open_grid(rows: usize, cols: usize, goal: Cell) -> Self {
        let mut aisles = BTreeMap::new();
        for row in 0..rows {
            aisles.insert(row, (0..cols).collect());
        }
        Self {
            rows,
            cols,
            aisles,
            goal,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error message describing
    /// the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows == 0 || self.cols == 0 {
            return Err(format!(
                "Grid must be non-empty, got {}x{}",
                self.rows, self.cols
            ));
        }
        if self.goal.row >= self.rows || self.goal.col >= self.cols {
            return Err(format!(
                "Goal {} is outside the {}x{} grid",
                self.goal, self.rows, self.cols
            ));
        }
        for (&row, cols) in &self.aisles {
            if row >= self.rows {
                return Err(format!(
                    "Aisle row {} is outside the {}x{} grid",
                    row, self.rows, self.cols
                ));
            }
            for &col in cols {
                if col >= self.cols {
                    return Err(format!(
                        "Aisle cell ({}, {}) is outside the {}x{} grid",
                        row, col, self.rows, self.cols
                    ));
                }
            }
        }
        if !self.wall_cost.is_finite() {
            return Err(format!("wall_cost must be finite, got {}", self.wall_cost));
        }
        if !self.step_cost.is_finite() {
            return Err(format!("step_cost must be finite, got {}", self.step_cost));
        }
        if !self.goal_reward.is_finite() {
            return Err(format!(
                "goal_reward must be finite, got {}",
                self.goal_reward
            ));
        }
        if self.wall_cost == self.step_cost {
            return Err(format!(
                "wall_cost must differ from step_cost, got {} for both (terminality is derived from the reward value)",
                self.wall_cost
            ));
        }
        if self.goal_reward == self.step_cost {
            return Err(format!(
                "goal_reward must differ from step_cost, got {} for both (terminality is derived from the reward value)",
                self.goal_reward
            ));
        }
        let has_open_cell = self
            .aisles
            .iter()
            .any(|(&row, cols)| cols.iter().any(|&col| Cell::new(row, col) != self.goal));
        if !has_open_cell {
            return Err(
                "Grid needs at least one open cell besides the goal to start episodes from"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Aisle layout of the reference warehouse, keyed by row.
fn reference_aisles() -> BTreeMap<usize, Vec<usize>> {
    let mut aisles = BTreeMap::new();
    aisles.insert(1, (1..=9).collect());
    aisles.insert(2, vec![1, 7, 9]);
    aisles.insert(3, (1..=7).chain([9]).collect());
    aisles.insert(4, vec![3, 7]);
    aisles.insert(5, (0..=10).collect());
    aisles.insert(6, vec![5]);
    aisles.insert(7, (1..=9).collect());
    aisles.insert(8, vec![3, 7]);
    aisles.insert(9, (0..=10).collect());
    aisles
}
