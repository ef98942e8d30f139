pub mod demo;
pub mod heatmap;
pub mod train;
pub mod visualize;

pub use demo::DemoMode;
pub use heatmap::HeatmapMode;
pub use train::{TrainConfig, TrainMode};
pub use visualize::VisualizeMode;
