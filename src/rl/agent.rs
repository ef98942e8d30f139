//! Tabular Q-learning agent
//!
//! Owns the action-value table and runs the episodic temporal-difference
//! training loop against a [`Warehouse`] environment.

use super::config::QLearningConfig;
use super::qtable::QTable;
use crate::grid::{Action, Cell, Warehouse};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Outcome of a single training episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeOutcome {
    /// Sum of all rewards received during the episode, terminal reward
    /// included
    pub reward: f64,
    /// Number of steps taken before the episode ended
    pub steps: usize,
    /// Whether the episode ended on the goal cell
    pub reached_goal: bool,
}

/// Q-learning agent
///
/// Holds the table being learned, the hyperparameters and a single RNG
/// stream used for both episode starts and action selection, so a fixed
/// seed reproduces an entire training run.
///
/// # Example
///
/// ```rust
/// use warehouse_rl::grid::{Cell, GridConfig, Warehouse};
/// use warehouse_rl::rl::{QLearningAgent, QLearningConfig};
///
/// let env = Warehouse::new(GridConfig::open_grid(4, 4, Cell::new(0, 3))).unwrap();
/// let config = QLearningConfig {
///     episodes: 5,
///     seed: Some(7),
///     ..Default::default()
/// };
/// let mut agent = QLearningAgent::new(config, env.rows(), env.cols()).unwrap();
/// let outcomes = agent.train(&env);
/// assert_eq!(outcomes.len(), 5);
/// ```
pub struct QLearningAgent {
    table: QTable,
    config: QLearningConfig,
    rng: StdRng,
    episodes_trained: usize,
}

impl QLearningAgent {
    /// Create a new agent with a zero-initialized table
    ///
    /// The table dimensions must match the environment the agent will train
    /// on.
    ///
    /// # Arguments
    ///
    /// * `config` - Q-learning hyperparameters
    /// * `rows` - Number of grid rows
    /// * `cols` - Number of grid columns
    pub fn new(config: QLearningConfig, rows: usize, cols: usize) -> Result<Self, String> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            table: QTable::zeros(rows, cols),
            config,
            rng,
            episodes_trained: 0,
        })
    }

    /// Pick an action for `cell`
    ///
    /// A uniform draw below `epsilon` takes the greedy action (ties to the
    /// lowest action index); any other draw takes a uniformly random action.
    /// The greedy branch sits BELOW the threshold, so epsilon is the exploit
    /// probability, not the explore probability.
    pub fn select_action(&mut self, cell: Cell) -> Action {
        if self.rng.gen::<f64>() < self.config.epsilon {
            self.table.greedy_action(cell)
        } else {
            Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
        }
    }

    /// Apply one temporal-difference update for the transition
    /// `cell --action--> next` that paid `reward`.
    ///
    /// The bootstrap term reads the maximum stored value at `next` whether
    /// or not `next` is terminal; terminal cells are never written by
    /// training, so their zero-initialized values feed the target.
    pub fn update(&mut self, cell: Cell, action: Action, reward: f64, next: Cell) {
        let old = self.table.get(cell, action);
        let td_error = reward + self.config.discount * self.table.max_value(next) - old;
        self.table
            .set(cell, action, old + self.config.learning_rate * td_error);
    }

    /// Run one training episode from a random non-terminal start
    ///
    /// Steps until a terminal cell is entered or the per-episode step cap
    /// fires, updating the table after every transition.
    pub fn run_episode(&mut self, env: &Warehouse) -> EpisodeOutcome {
        let mut cell = env.random_start(&mut self.rng);
        let mut reward_total = 0.0;
        let mut steps = 0;

        while !env.is_terminal(cell) && steps < self.config.max_steps_per_episode {
            let action = self.select_action(cell);
            let next = env.next_cell(cell, action);
            let reward = env.reward(next);
            reward_total += reward;
            self.update(cell, action, reward, next);
            cell = next;
            steps += 1;
        }

        self.episodes_trained += 1;
        EpisodeOutcome {
            reward: reward_total,
            steps,
            reached_goal: cell == env.goal(),
        }
    }

    /// Train for the configured number of episodes, returning every
    /// episode's outcome in order.
    pub fn train(&mut self, env: &Warehouse) -> Vec<EpisodeOutcome> {
        (0..self.config.episodes)
            .map(|_| self.run_episode(env))
            .collect()
    }

    /// The learned table.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Consume the agent, keeping only the learned table.
    pub fn into_table(self) -> QTable {
        self.table
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Total number of episodes this agent has trained for.
    pub fn episodes_trained(&self) -> usize {
        self.episodes_trained
    }
}
