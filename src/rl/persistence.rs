//! Persistence for trained Q-tables
//!
//! This module saves and loads a learned action-value table together with
//! the configuration it was trained under. The table itself is a compact
//! bincode artifact; a JSON sidecar carries the metadata needed to rebuild
//! the environment and reproduce the run.

use super::agent::QLearningAgent;
use super::config::QLearningConfig;
use super::qtable::QTable;
use crate::grid::GridConfig;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata saved with the Q-table
///
/// Contains the grid and training configuration needed to properly
/// reconstruct the environment the table was learned on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Grid configuration the table was trained on
    pub grid_config: GridConfig,

    /// Q-learning hyperparameters used during training
    pub qlearning_config: QLearningConfig,

    /// Number of episodes trained
    pub episodes_trained: usize,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl TableMetadata {
    /// Create new metadata
    pub fn new(
        grid_config: GridConfig,
        qlearning_config: QLearningConfig,
        episodes_trained: usize,
    ) -> Self {
        Self {
            grid_config,
            qlearning_config,
            episodes_trained,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Save a trained agent's Q-table to a file
///
/// Serializes both the table and its metadata to the specified path.
/// Creates parent directories if they don't exist.
///
/// The table is saved in two files:
/// - `<path>` - Table values (bincode)
/// - `<path>.meta.json` - Metadata as JSON
///
/// # Arguments
///
/// * `agent` - The trained agent whose table should be saved
/// * `grid_config` - Grid the agent was trained on
/// * `path` - Path where the table should be saved
///
/// # Returns
///
/// `Ok(())` on success, or an error if saving fails
pub fn save_table(agent: &QLearningAgent, grid_config: &GridConfig, path: &Path) -> Result<()> {
    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    // Save table values
    let bytes = bincode::serialize(agent.table()).context("Failed to serialize Q-table")?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write Q-table to {:?}", path))?;

    // Create metadata
    let metadata = TableMetadata::new(
        grid_config.clone(),
        agent.config().clone(),
        agent.episodes_trained(),
    );

    // Save metadata as JSON
    let meta_path = path.with_extension("meta.json");
    let meta_json =
        serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    Ok(())
}

/// Load a trained Q-table from a file
///
/// Deserializes a previously saved table, returning both the table and its
/// associated metadata.
///
/// # Arguments
///
/// * `path` - Path to the saved table file (without .meta.json extension)
///
/// # Returns
///
/// A tuple containing the loaded table and its metadata
pub fn load_table(path: &Path) -> Result<(QTable, TableMetadata)> {
    // Load metadata first
    let meta_path = path.with_extension("meta.json");
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: TableMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    // Load table values
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read Q-table from {:?}", path))?;
    let table: QTable = bincode::deserialize(&bytes).context("Failed to deserialize Q-table")?;

    ensure!(
        table.rows() == metadata.grid_config.rows && table.cols() == metadata.grid_config.cols,
        "Q-table is {}x{} but metadata describes a {}x{} grid",
        table.rows(),
        table.cols(),
        metadata.grid_config.rows,
        metadata.grid_config.cols
    );

    Ok((table, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Warehouse};
    use tempfile::TempDir;

    fn trained_agent(grid_config: &GridConfig, episodes: usize) -> QLearningAgent {
        let env = Warehouse::new(grid_config.clone()).unwrap();
        let config = QLearningConfig {
            episodes,
            seed: Some(21),
            ..Default::default()
        };
        let mut agent = QLearningAgent::new(config, env.rows(), env.cols()).unwrap();
        agent.train(&env);
        agent
    }

    #[test]
    fn test_metadata_creation() {
        let metadata = TableMetadata::new(GridConfig::default(), QLearningConfig::default(), 1000);

        assert_eq!(metadata.grid_config.rows, 11);
        assert_eq!(metadata.qlearning_config.episodes, 1000);
        assert_eq!(metadata.episodes_trained, 1000);
        assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = TableMetadata::new(GridConfig::default(), QLearningConfig::default(), 500);

        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: TableMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.grid_config.cols, 11);
        assert_eq!(deserialized.grid_config.goal, Cell::new(0, 5));
        assert_eq!(deserialized.episodes_trained, 500);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models").join("table.bin");

        let grid_config = GridConfig::open_grid(5, 5, Cell::new(0, 4));
        let agent = trained_agent(&grid_config, 30);
        save_table(&agent, &grid_config, &path).unwrap();

        assert!(path.exists());
        assert!(path.with_extension("meta.json").exists());

        let (table, metadata) = load_table(&path).unwrap();
        assert_eq!(&table, agent.table());
        assert_eq!(metadata.episodes_trained, 30);
        assert_eq!(metadata.grid_config.rows, 5);
        assert_eq!(metadata.qlearning_config.seed, Some(21));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.bin");
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn test_load_rejects_mismatched_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("table.bin");

        let grid_config = GridConfig::open_grid(5, 5, Cell::new(0, 4));
        let agent = trained_agent(&grid_config, 10);
        save_table(&agent, &grid_config, &path).unwrap();

        // Rewrite the sidecar to describe a different grid.
        let meta_path = path.with_extension("meta.json");
        let metadata = TableMetadata::new(GridConfig::default(), QLearningConfig::default(), 10);
        std::fs::write(&meta_path, serde_json::to_string_pretty(&metadata).unwrap()).unwrap();

        assert!(load_table(&path).is_err());
    }
}
