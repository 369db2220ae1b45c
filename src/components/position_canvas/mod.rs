mod component;
mod geometry;
mod grid;
mod marker;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::PositionCanvas;
pub use types::NodeRecord;
