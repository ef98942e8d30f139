//! Tabular Q-learning for the warehouse robot
//!
//! Provides:
//! - Q-learning hyperparameter configuration
//! - Dense action-value table over the grid
//! - Episodic temporal-difference training
//! - Greedy path extraction from a learned table
//! - Persistence of trained tables with metadata

pub mod agent;
pub mod config;
pub mod path;
pub mod persistence;
pub mod qtable;

pub use agent::{EpisodeOutcome, QLearningAgent};
pub use config::QLearningConfig;
pub use path::{extract_greedy_path, GreedyPath, PathOutcome};
pub use persistence::{load_table, save_table, TableMetadata};
pub use qtable::QTable;
