use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use warehouse_rl::grid::{Cell, GridConfig};
use warehouse_rl::modes::{DemoMode, HeatmapMode, TrainConfig, TrainMode, VisualizeMode};
use warehouse_rl::rl::QLearningConfig;

#[derive(Parser)]
#[command(name = "warehouse_rl")]
#[command(version, about = "Q-learning warehouse robot with TUI path animation")]
struct Cli {
    /// Execution mode
    #[arg(long, default_value = "demo")]
    mode: Mode,

    /// Number of training episodes (defaults to the built-in 1000)
    #[arg(long)]
    episodes: Option<usize>,

    /// Path of the Q-table artifact to write or read
    #[arg(long, default_value = "models/warehouse_q.bin")]
    model: PathBuf,

    /// Row of the path start cell
    #[arg(long, default_value = "9")]
    start_row: usize,

    /// Column of the path start cell
    #[arg(long, default_value = "0")]
    start_col: usize,

    /// Log training progress every N episodes
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// Seed for the training RNG (omit to seed from entropy)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train, print the greedy path, then animate it
    Demo,
    /// Train a Q-table and save it
    Train,
    /// Animate the greedy path of a saved Q-table
    Visualize,
    /// Show the per-cell maximum values of a saved Q-table
    Heatmap,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let start = Cell::new(cli.start_row, cli.start_col);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Demo => {
            let mut demo_mode = DemoMode::new(train_config(&cli), start)?;
            demo_mode.run().await?;
        }
        Mode::Train => {
            let mut train_mode = TrainMode::new(train_config(&cli))?;
            train_mode.run()?;
        }
        Mode::Visualize => {
            let mut visualize_mode = VisualizeMode::new(&cli.model, start)?;
            visualize_mode.run().await?;
        }
        Mode::Heatmap => {
            let mut heatmap_mode = HeatmapMode::new(&cli.model)?;
            heatmap_mode.run().await?;
        }
    }

    Ok(())
}

/// Training configuration assembled from CLI arguments
fn train_config(cli: &Cli) -> TrainConfig {
    let mut qlearning_config = QLearningConfig::default();
    if let Some(episodes) = cli.episodes {
        qlearning_config.episodes = episodes;
    }
    qlearning_config.seed = cli.seed;

    TrainConfig {
        save_path: cli.model.clone(),
        log_frequency: cli.log_frequency,
        grid_config: GridConfig::default(),
        qlearning_config,
    }
}
