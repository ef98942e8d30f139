use super::action::Action;
use super::cell::Cell;
use super::config::GridConfig;
use ndarray::Array2;
use rand::Rng;

/// The warehouse grid environment
///
/// Owns the immutable reward surface built from a [`GridConfig`] and answers
/// the three questions training needs: what reward a cell pays, whether it
/// ends an episode, and where an action leads. The environment holds no
/// mutable state; the robot's position lives with whoever is walking it.
pub struct Warehouse {
    config: GridConfig,
    rewards: Array2<f64>,
}

impl Warehouse {
    /// Build the reward surface from a validated configuration.
    ///
    /// Every cell starts at the wall cost, aisle cells are then lowered to
    /// the step cost, and the goal reward is written last so the goal stays
    /// terminal even when an aisle lists it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::grid::{Cell, GridConfig, Warehouse};
    ///
    /// let env = Warehouse::new(GridConfig::default()).unwrap();
    /// assert_eq!(env.reward(Cell::new(0, 5)), 100.0);
    /// assert!(env.is_terminal(Cell::new(0, 5)));
    /// ```
    pub fn new(config: GridConfig) -> Result<Self, String> {
        config.validate()?;
        let rewards = build_rewards(&config);
        Ok(Self { config, rewards })
    }

    /// Reward received for entering `cell`.
    pub fn reward(&self, cell: Cell) -> f64 {
        self.rewards[[cell.row, cell.col]]
    }

    /// Whether `cell` ends an episode.
    ///
    /// A cell is terminal exactly when its reward differs from the open-cell
    /// step cost; both walls and the goal end an episode.
    pub fn is_terminal(&self, cell: Cell) -> bool {
        self.reward(cell) != self.config.step_cost
    }

    /// One step from `cell` in the direction of `action`.
    ///
    /// Moves that would leave the grid are clamped: the robot stays put and
    /// the caller still charges the reward of the (unchanged) cell. Moving
    /// onto a wall is a legal transition; the wall cost is the penalty, not a
    /// blocked move.
    pub fn next_cell(&self, cell: Cell, action: Action) -> Cell {
        let Cell { mut row, mut col } = cell;
        match action {
            Action::Up if row > 0 => row -= 1,
            Action::Right if col < self.config.cols - 1 => col += 1,
            Action::Down if row < self.config.rows - 1 => row += 1,
            Action::Left if col > 0 => col -= 1,
            _ => {}
        }
        Cell::new(row, col)
    }

    /// Whether `cell` lies on the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.config.rows && cell.col < self.config.cols
    }

    /// Draw a uniformly random non-terminal cell by rejection sampling.
    ///
    /// Keeps drawing (row, then column) until the cell is open. Validation
    /// guarantees at least one open cell exists, so the loop terminates.
    pub fn random_start<R: Rng>(&self, rng: &mut R) -> Cell {
        loop {
            let row = rng.gen_range(0..self.config.rows);
            let col = rng.gen_range(0..self.config.cols);
            let cell = Cell::new(row, col);
            if !self.is_terminal(cell) {
                return cell;
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn goal(&self) -> Cell {
        self.config.goal
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The full reward surface, row-major.
    pub fn rewards(&self) -> &Array2<f64> {
        &self.rewards
    }
}

fn build_rewards(config: &GridConfig) -> Array2<f64> {
    let mut rewards = Array2::from_elem((config.rows, config.cols), config.wall_cost);
    for (&row, cols) in &config.aisles {
        for &col in cols {
            rewards[[row, col]] = config.step_cost;
        }
    }
    rewards[[config.goal.row, config.goal.col]] = config.goal_reward;
    rewards
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference_env() -> Warehouse {
        Warehouse::new(GridConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GridConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(Warehouse::new(config).is_err());

        // A NaN step cost would leave no open cells for random_start.
        let config = GridConfig {
            step_cost: f64::NAN,
            ..Default::default()
        };
        assert!(Warehouse::new(config).is_err());
    }

    #[test]
    fn test_reference_reward_surface() {
        let env = reference_env();
        assert_eq!(env.reward(Cell::new(0, 5)), 100.0);
        assert_eq!(env.reward(Cell::new(0, 0)), -100.0);
        assert_eq!(env.reward(Cell::new(5, 0)), -1.0);
        assert_eq!(env.reward(Cell::new(9, 0)), -1.0);
        assert_eq!(env.reward(Cell::new(6, 5)), -1.0);
        assert_eq!(env.reward(Cell::new(6, 4)), -100.0);
        assert_eq!(env.reward(Cell::new(10, 10)), -100.0);
    }

    #[test]
    fn test_terminality_follows_reward_surface() {
        let env = reference_env();
        for row in 0..env.rows() {
            for col in 0..env.cols() {
                let cell = Cell::new(row, col);
                assert_eq!(env.is_terminal(cell), env.reward(cell) != -1.0);
            }
        }
        assert!(env.is_terminal(env.goal()));
        assert!(!env.is_terminal(Cell::new(9, 0)));
    }

    #[test]
    fn test_contains() {
        let env = reference_env();
        assert!(env.contains(Cell::new(0, 0)));
        assert!(env.contains(Cell::new(10, 10)));
        assert!(!env.contains(Cell::new(11, 0)));
        assert!(!env.contains(Cell::new(0, 11)));
    }

    #[test]
    fn test_moves_clamp_at_grid_edges() {
        let env = reference_env();
        assert_eq!(env.next_cell(Cell::new(0, 0), Action::Up), Cell::new(0, 0));
        assert_eq!(env.next_cell(Cell::new(0, 0), Action::Left), Cell::new(0, 0));
        assert_eq!(
            env.next_cell(Cell::new(10, 10), Action::Down),
            Cell::new(10, 10)
        );
        assert_eq!(
            env.next_cell(Cell::new(10, 10), Action::Right),
            Cell::new(10, 10)
        );
    }

    #[test]
    fn test_interior_moves() {
        let env = reference_env();
        let cell = Cell::new(5, 5);
        assert_eq!(env.next_cell(cell, Action::Up), Cell::new(4, 5));
        assert_eq!(env.next_cell(cell, Action::Right), Cell::new(5, 6));
        assert_eq!(env.next_cell(cell, Action::Down), Cell::new(6, 5));
        assert_eq!(env.next_cell(cell, Action::Left), Cell::new(5, 4));
    }

    #[test]
    fn test_moving_onto_walls_is_not_blocked() {
        let env = reference_env();
        // (1, 1) is open, (1, 0) is shelving.
        let next = env.next_cell(Cell::new(1, 1), Action::Left);
        assert_eq!(next, Cell::new(1, 0));
        assert_eq!(env.reward(next), -100.0);
        assert!(env.is_terminal(next));
    }

    #[test]
    fn test_goal_overwrites_aisle_listing() {
        let mut config = GridConfig::default();
        config.aisles.entry(0).or_default().push(5);
        let env = Warehouse::new(config).unwrap();
        assert_eq!(env.reward(Cell::new(0, 5)), 100.0);
        assert!(env.is_terminal(Cell::new(0, 5)));
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = Warehouse::new(GridConfig::default()).unwrap();
        let b = Warehouse::new(GridConfig::default()).unwrap();
        assert_eq!(a.rewards(), b.rewards());
    }

    #[test]
    fn test_random_start_never_terminal() {
        let env = reference_env();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let cell = env.random_start(&mut rng);
            assert!(!env.is_terminal(cell));
            assert_eq!(env.reward(cell), -1.0);
        }
    }
}
