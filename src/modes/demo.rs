//! Demonstration mode: train, report the greedy path, then animate it
//!
//! This module runs the full flow end to end. It trains a fresh table with
//! the configured hyperparameters, prints the greedy path from the start
//! cell together with its accumulated reward, saves the table, replays the
//! walk in the TUI, and ends on the heatmap of learned values.
//!
//! # Example
//!
//! ```rust,ignore
//! use warehouse_rl::grid::Cell;
//! use warehouse_rl::modes::{DemoMode, TrainConfig};
//! use std::path::PathBuf;
//!
//! let config = TrainConfig::new(PathBuf::from("models/warehouse_q.bin"));
//! let mut demo = DemoMode::new(config, Cell::new(9, 0))?;
//! demo.run().await?;
//! ```

use anyhow::{ensure, Result};

use crate::grid::Cell;
use crate::modes::{HeatmapMode, TrainConfig, TrainMode, VisualizeMode};
use crate::rl::{extract_greedy_path, GreedyPath, PathOutcome};

/// Demonstration mode
///
/// Owns a [`TrainMode`] for the training phase and hands the saved table to
/// a [`VisualizeMode`] and then a [`HeatmapMode`] for the display phases.
pub struct DemoMode {
    /// Training phase runner
    train: TrainMode,

    /// Cell the extracted path starts from
    start: Cell,
}

impl DemoMode {
    /// Create a new demonstration mode
    ///
    /// # Arguments
    ///
    /// * `config` - Training configuration, including the save path
    /// * `start` - Cell the extracted path starts from
    pub fn new(config: TrainConfig, start: Cell) -> Result<Self> {
        let train = TrainMode::new(config)?;
        let env = train.env();
        ensure!(
            env.contains(start),
            "Start cell {} is outside the {}x{} grid",
            start,
            env.rows(),
            env.cols()
        );

        Ok(Self { train, start })
    }

    /// Run the demonstration
    ///
    /// Trains, prints the greedy path from the start cell, animates the
    /// walk, and closes with the learned value heatmap. When the walk cannot
    /// complete (terminal start or truncation) the reason is reported and
    /// the animation is skipped; the heatmap still shows what was learned.
    pub async fn run(&mut self) -> Result<()> {
        self.train.run()?;

        let env = self.train.env();
        let max_len = self.train.config().qlearning_config.max_path_length;
        let path = extract_greedy_path(self.train.agent().table(), env, self.start, max_len);
        let model_path = self.train.config().save_path.clone();

        match path.outcome {
            PathOutcome::TerminalStart => {
                println!(
                    "\nStart cell {} is terminal; there is no path to extract.",
                    self.start
                );
            }
            PathOutcome::Truncated => {
                println!(
                    "\nNo complete path from {}: the greedy walk was cut off after {} cells.",
                    self.start,
                    path.len()
                );
            }
            PathOutcome::Complete => {
                println!("\nPath found from {}:", self.start);
                println!("  {}", path_line(&path));
                println!("Total accumulated reward: {}", path.total_reward(env));
                if let Some(last) = path.last() {
                    println!("Final cell reward: {}", env.reward(last));
                }

                println!("\nStarting path animation...");
                let mut visualize = VisualizeMode::new(&model_path, self.start)?;
                visualize.run().await?;
            }
        }

        println!("\nShowing the learned value heatmap...");
        let mut heatmap = HeatmapMode::new(&model_path)?;
        heatmap.run().await
    }
}

/// Path cells joined for console output, e.g. `(9, 0) -> (8, 0) -> ...`
fn path_line(path: &GreedyPath) -> String {
    path.cells
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use tempfile::TempDir;

    #[test]
    fn test_demo_mode_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = TrainConfig::new(temp_dir.path().join("table.bin"));
        assert!(DemoMode::new(config, Cell::new(9, 0)).is_ok());
    }

    #[test]
    fn test_demo_mode_rejects_out_of_grid_start() {
        let temp_dir = TempDir::new().unwrap();

        // The default grid is 11x11; both coordinates are checked.
        let config = TrainConfig::new(temp_dir.path().join("table.bin"));
        assert!(DemoMode::new(config, Cell::new(11, 0)).is_err());

        let config = TrainConfig::new(temp_dir.path().join("table.bin"));
        assert!(DemoMode::new(config, Cell::new(0, 11)).is_err());
    }

    #[test]
    fn test_saved_artifact_feeds_animation_and_heatmap() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("table.bin");

        let mut config = TrainConfig::new(save_path.clone());
        config.grid_config = GridConfig::open_grid(4, 4, Cell::new(0, 3));
        config.qlearning_config.episodes = 20;
        config.qlearning_config.seed = Some(6);

        let mut demo = DemoMode::new(config, Cell::new(3, 0)).unwrap();
        demo.train.run().unwrap();

        // Both display phases build from the one saved table.
        assert!(VisualizeMode::new(&save_path, Cell::new(3, 0)).is_ok());
        assert!(HeatmapMode::new(&save_path).is_ok());
    }

    #[test]
    fn test_path_line_formatting() {
        let path = GreedyPath {
            cells: vec![Cell::new(9, 0), Cell::new(8, 0), Cell::new(8, 1)],
            outcome: PathOutcome::Complete,
        };
        assert_eq!(path_line(&path), "(9, 0) -> (8, 0) -> (8, 1)");

        let empty = GreedyPath {
            cells: Vec::new(),
            outcome: PathOutcome::TerminalStart,
        };
        assert_eq!(path_line(&empty), "");
    }
}
