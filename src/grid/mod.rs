//! Warehouse grid environment
//!
//! Defines the reward surface and the clamped transition function over a
//! fixed 2D grid. The environment is pure lookup with no mutable state, so
//! training, path extraction and rendering can all share one instance.

pub mod action;
pub mod cell;
pub mod config;
pub mod warehouse;

pub use action::Action;
pub use cell::Cell;
pub use config::GridConfig;
pub use warehouse::Warehouse;
