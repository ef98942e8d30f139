//! Greedy path extraction from a learned action-value table

use super::qtable::QTable;
use crate::grid::{Cell, Warehouse};

/// How a greedy walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// The walk reached a terminal cell
    Complete,
    /// The length cap fired before any terminal cell was reached
    Truncated,
    /// The start cell was already terminal, so there was nothing to walk
    TerminalStart,
}

/// A path produced by greedily following a learned table
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyPath {
    /// Visited cells in order, the start cell first
    pub cells: Vec<Cell>,
    /// How the walk ended
    pub outcome: PathOutcome,
}

impl GreedyPath {
    pub fn is_complete(&self) -> bool {
        self.outcome == PathOutcome::Complete
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell the walk ended on, if any.
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Sum of the rewards of every cell on the path, the start cell
    /// included.
    pub fn total_reward(&self, env: &Warehouse) -> f64 {
        self.cells.iter().map(|&cell| env.reward(cell)).sum()
    }
}

/// Walk greedily from `start`, following the table's best action at each
/// cell
///
/// The walk appends cells until a terminal cell is reached or the path holds
/// `max_len` cells, whichever comes first. Starting on a terminal cell
/// yields an empty path, matching intuition: a robot already standing on the
/// goal (or inside shelving) has no route to extract.
///
/// `start` must lie on the grid; surfaces that accept arbitrary start cells
/// check [`Warehouse::contains`] first.
///
/// Ties in the table break to the lowest action index, so extraction is
/// deterministic for a fixed table.
pub fn extract_greedy_path(
    table: &QTable,
    env: &Warehouse,
    start: Cell,
    max_len: usize,
) -> GreedyPath {
    if env.is_terminal(start) {
        return GreedyPath {
            cells: Vec::new(),
            outcome: PathOutcome::TerminalStart,
        };
    }

    let mut cells = vec![start];
    let mut cell = start;
    while !env.is_terminal(cell) && cells.len() < max_len {
        let action = table.greedy_action(cell);
        cell = env.next_cell(cell, action);
        cells.push(cell);
    }

    let outcome = if env.is_terminal(cell) {
        PathOutcome::Complete
    } else {
        PathOutcome::Truncated
    };
    GreedyPath { cells, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Action, GridConfig};
    use crate::rl::{QLearningAgent, QLearningConfig};

    #[test]
    fn test_terminal_start_yields_empty_path() {
        let env = Warehouse::new(GridConfig::default()).unwrap();
        let table = QTable::zeros(env.rows(), env.cols());

        // Goal start.
        let path = extract_greedy_path(&table, &env, Cell::new(0, 5), 100);
        assert_eq!(path.outcome, PathOutcome::TerminalStart);
        assert!(path.is_empty());
        assert!(!path.is_complete());
        assert_eq!(path.last(), None);
        assert_eq!(path.total_reward(&env), 0.0);

        // Wall start.
        let path = extract_greedy_path(&table, &env, Cell::new(0, 0), 100);
        assert_eq!(path.outcome, PathOutcome::TerminalStart);
        assert!(path.is_empty());
    }

    #[test]
    fn test_walk_follows_greedy_actions() {
        let env = Warehouse::new(GridConfig::open_grid(1, 3, Cell::new(0, 2))).unwrap();
        let mut table = QTable::zeros(1, 3);
        table.set(Cell::new(0, 0), Action::Right, 1.0);
        table.set(Cell::new(0, 1), Action::Right, 1.0);

        let path = extract_greedy_path(&table, &env, Cell::new(0, 0), 100);
        assert_eq!(path.outcome, PathOutcome::Complete);
        assert_eq!(
            path.cells,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]
        );
        assert_eq!(path.last(), Some(Cell::new(0, 2)));
        // -1 (start) + -1 + 100 (goal).
        assert_eq!(path.total_reward(&env), 98.0);
    }

    #[test]
    fn test_cycling_walk_is_truncated_at_cap() {
        let env = Warehouse::new(GridConfig::open_grid(1, 3, Cell::new(0, 2))).unwrap();
        // A zeroed table always answers Up, which clamps to a self-loop.
        let table = QTable::zeros(1, 3);

        let path = extract_greedy_path(&table, &env, Cell::new(0, 0), 10);
        assert_eq!(path.outcome, PathOutcome::Truncated);
        assert_eq!(path.len(), 10);
        assert!(path.cells.iter().all(|&cell| cell == Cell::new(0, 0)));
    }

    #[test]
    fn test_path_never_exceeds_cap() {
        let env = Warehouse::new(GridConfig::default()).unwrap();
        let table = QTable::zeros(env.rows(), env.cols());
        for max_len in [1, 2, 50, 100] {
            let path = extract_greedy_path(&table, &env, Cell::new(9, 0), max_len);
            assert!(path.len() <= max_len);
        }
    }

    #[test]
    fn test_trained_table_walks_to_goal() {
        let env = Warehouse::new(GridConfig::default()).unwrap();
        let config = QLearningConfig {
            seed: Some(42),
            ..Default::default()
        };
        let mut agent = QLearningAgent::new(config, env.rows(), env.cols()).unwrap();
        let outcomes = agent.train(&env);
        assert_eq!(outcomes.len(), 1000);

        let path = extract_greedy_path(agent.table(), &env, Cell::new(9, 0), 100);
        assert_eq!(path.outcome, PathOutcome::Complete);
        assert_eq!(path.cells[0], Cell::new(9, 0));
        assert_eq!(path.last(), Some(Cell::new(0, 5)));
        assert!(path.len() <= 100);

        // Every interior cell is an open aisle; only the last cell pays the
        // goal reward.
        let total = path.total_reward(&env);
        assert_eq!(total, (path.len() - 1) as f64 * -1.0 + 100.0);
        assert!(total > path.len() as f64 * -100.0);
    }

    #[test]
    fn test_trained_table_walks_to_goal_from_all_open_cells() {
        let env = Warehouse::new(GridConfig::default()).unwrap();
        let config = QLearningConfig {
            seed: Some(7),
            ..Default::default()
        };
        let mut agent = QLearningAgent::new(config, env.rows(), env.cols()).unwrap();
        agent.train(&env);

        for row in 0..env.rows() {
            for col in 0..env.cols() {
                let start = Cell::new(row, col);
                if env.is_terminal(start) {
                    continue;
                }
                let path = extract_greedy_path(agent.table(), &env, start, 100);
                assert_eq!(path.outcome, PathOutcome::Complete, "start {}", start);
                assert_eq!(path.last(), Some(env.goal()), "start {}", start);
            }
        }
    }
}
