//! Radial hierarchical edge bundling plot.

pub mod color;
mod component;
pub mod hierarchy;
pub mod layout;
pub mod path;
pub mod render;
pub mod shape;
pub mod state;
mod types;

pub use component::CirclePlot;
pub use state::{CirclePlotState, Key, PlotError};
pub use types::{NodeKey, PlotData, PlotOptions};
