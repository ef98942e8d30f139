//! Training mode for the Q-learning agent
//!
//! This module implements the console training loop. It runs episodes in the
//! warehouse environment, records statistics, logs progress at a fixed
//! cadence and saves the learned table when training finishes.
//!
//! # Example
//!
//! ```rust,ignore
//! use warehouse_rl::modes::{TrainMode, TrainConfig};
//! use warehouse_rl::grid::GridConfig;
//! use warehouse_rl::rl::QLearningConfig;
//! use std::path::PathBuf;
//!
//! let train_config = TrainConfig {
//!     save_path: PathBuf::from("models/warehouse_q.bin"),
//!     log_frequency: 100,
//!     grid_config: GridConfig::default(),
//!     qlearning_config: QLearningConfig::default(),
//! };
//!
//! let mut train_mode = TrainMode::new(train_config)?;
//! train_mode.run()?;
//! ```

use anyhow::{anyhow, ensure, Context, Result};
use std::path::PathBuf;

use crate::grid::{GridConfig, Warehouse};
use crate::metrics::TrainingStats;
use crate::rl::{save_table, QLearningAgent, QLearningConfig};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Path to save the final trained table
    pub save_path: PathBuf,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Grid configuration (layout, rewards)
    pub grid_config: GridConfig,

    /// Q-learning hyperparameters, including the episode count
    pub qlearning_config: QLearningConfig,
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    ///
    /// # Arguments
    ///
    /// * `save_path` - Path to save the final table
    ///
    /// # Example
    ///
    /// ```rust
    /// use warehouse_rl::modes::TrainConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = TrainConfig::new(PathBuf::from("models/warehouse_q.bin"));
    /// assert_eq!(config.log_frequency, 100);
    /// ```
    pub fn new(save_path: PathBuf) -> Self {
        Self {
            save_path,
            log_frequency: 100,
            grid_config: GridConfig::default(),
            qlearning_config: QLearningConfig::default(),
        }
    }
}

/// Training mode for the Q-learning agent
///
/// Runs the training loop episode by episode, tracking statistics and saving
/// the learned table at the end.
pub struct TrainMode {
    /// Agent being trained
    agent: QLearningAgent,

    /// Warehouse environment episodes run in
    env: Warehouse,

    /// Training statistics tracker
    stats: TrainingStats,

    /// Training configuration
    config: TrainConfig,
}

impl TrainMode {
    /// Create a new training mode
    ///
    /// Builds the environment and agent from the configuration, failing fast
    /// on any invalid setting.
    ///
    /// # Arguments
    ///
    /// * `config` - Training configuration
    pub fn new(config: TrainConfig) -> Result<Self> {
        ensure!(config.log_frequency > 0, "log_frequency must be at least 1");

        let env = Warehouse::new(config.grid_config.clone()).map_err(|err| anyhow!(err))?;
        let agent = QLearningAgent::new(config.qlearning_config.clone(), env.rows(), env.cols())
            .map_err(|err| anyhow!(err))?;

        // 100-episode rolling window for progress lines
        let stats = TrainingStats::new(100);

        Ok(Self {
            agent,
            env,
            stats,
            config,
        })
    }

    /// Run the training loop
    ///
    /// Trains the agent for the configured number of episodes, logging
    /// progress and saving the final table.
    ///
    /// # Returns
    ///
    /// `Ok(())` on successful completion
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        let episodes = self.config.qlearning_config.episodes;
        for episode in 0..episodes {
            // Run one episode
            let outcome = self.agent.run_episode(&self.env);

            // Record episode stats
            self.stats
                .record_episode(outcome.reward, outcome.steps, outcome.reached_goal);

            // Log progress
            if (episode + 1) % self.config.log_frequency == 0 {
                self.print_progress(episode + 1);
            }
        }

        // Final save
        self.save_table()?;

        println!("\nTraining complete!");
        println!("Final Q-table saved to: {:?}", self.config.save_path);
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());
        println!(
            "Overall average reward: {:.2} | Final episode reward: {}",
            self.stats.overall_mean_reward(),
            self.stats.last_episode_reward()
        );

        Ok(())
    }

    /// Save the final trained table
    fn save_table(&self) -> Result<()> {
        save_table(&self.agent, self.env.config(), &self.config.save_path).with_context(|| {
            format!(
                "Failed to save final Q-table to {:?}",
                self.config.save_path
            )
        })?;

        Ok(())
    }

    /// Print training header information
    fn print_header(&self) {
        let grid = &self.config.grid_config;
        let q = &self.config.qlearning_config;

        println!("{}", "=".repeat(70));
        println!("Q-Learning Training - Warehouse Robot");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", q.episodes);
        println!(
            "Grid: {}x{}, goal at {}",
            grid.rows, grid.cols, grid.goal
        );
        println!("Hyperparameters:");
        println!("  Epsilon (exploit probability): {}", q.epsilon);
        println!("  Discount factor: {}", q.discount);
        println!("  Learning rate: {}", q.learning_rate);
        println!("  Episode step cap: {}", q.max_steps_per_episode);
        if let Some(seed) = q.seed {
            println!("  Seed: {}", seed);
        }
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("Save path: {:?}", self.config.save_path);
        println!("{}", "=".repeat(70));
        println!();
    }

    /// Print training progress
    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.qlearning_config.episodes,
            self.stats.format_summary()
        );
    }

    /// The trained agent.
    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    /// The environment episodes were run in.
    pub fn env(&self) -> &Warehouse {
        &self.env
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use tempfile::TempDir;

    #[test]
    fn test_train_config_creation() {
        let config = TrainConfig::new(PathBuf::from("test.bin"));
        assert_eq!(config.save_path, PathBuf::from("test.bin"));
        assert_eq!(config.log_frequency, 100);
        assert_eq!(config.qlearning_config.episodes, 1000);
    }

    #[test]
    fn test_train_mode_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = TrainConfig::new(temp_dir.path().join("table.bin"));
        assert!(TrainMode::new(config).is_ok());
    }

    #[test]
    fn test_train_mode_rejects_invalid_configs() {
        let mut config = TrainConfig::new(PathBuf::from("table.bin"));
        config.log_frequency = 0;
        assert!(TrainMode::new(config).is_err());

        let mut config = TrainConfig::new(PathBuf::from("table.bin"));
        config.grid_config.rows = 0;
        assert!(TrainMode::new(config).is_err());

        let mut config = TrainConfig::new(PathBuf::from("table.bin"));
        config.qlearning_config.epsilon = 7.0;
        assert!(TrainMode::new(config).is_err());
    }

    #[test]
    fn test_full_train_run_saves_table() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("models").join("table.bin");

        let mut config = TrainConfig::new(save_path.clone());
        config.grid_config = GridConfig::open_grid(4, 4, Cell::new(0, 3)); // Small grid for test
        config.log_frequency = 10;
        config.qlearning_config.episodes = 20;
        config.qlearning_config.seed = Some(3);

        let mut train_mode = TrainMode::new(config).unwrap();
        train_mode.run().unwrap();

        assert!(save_path.exists());
        assert!(save_path.with_extension("meta.json").exists());
        assert_eq!(train_mode.agent().episodes_trained(), 20);
        assert_eq!(train_mode.stats().total_episodes(), 20);
        assert!(train_mode.stats().total_steps() > 0);
    }
}
