pub mod heatmap;
pub mod renderer;

pub use heatmap::HeatmapRenderer;
pub use renderer::{Renderer, WalkView};
