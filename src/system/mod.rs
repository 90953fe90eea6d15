//! Shared state and the coordinator running feeds and rendering together

pub mod shared_state;
pub mod visualizer;

pub use shared_state::{PositionSlot, SharedPositions};
pub use visualizer::{FeedExit, Shutdown, Visualizer};
