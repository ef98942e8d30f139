//! Warehouse RL - Tabular Q-learning for a warehouse picking robot
//!
//! This library provides:
//! - The warehouse grid environment (grid module)
//! - Q-learning training, path extraction and persistence (rl module)
//! - Training statistics tracking (metrics module)
//! - TUI rendering for path animation and value heatmaps (render module)
//! - Execution modes: demo, train, visualize, heatmap (modes module)

pub mod grid;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
