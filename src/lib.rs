//! WiFi Trilateration Visualizer
//!
//! A live plot of the trilateration backend: subscribes to the sensor and
//! trilateration position feeds, keeps the latest snapshot of each, and
//! redraws both as scatter series on a fixed cadence.

pub mod core;
pub mod processing;
pub mod feed;
pub mod render;
pub mod system;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{FeedKind, Position2D, PositionId, PositionMap};
pub use crate::processing::{ParseError, SnapshotParser};
pub use crate::feed::{
    FeedConsumer, FeedError, FeedResult, FeedSource, FeedConnection, FeedStats,
    ReconnectPolicy, ReconnectDecision, RetryForever, ExponentialBackoff, GiveUpAfter,
    WebSocketSource,
};
pub use crate::render::{
    PlotFrame, PlotSurface, PlotWindow, EguiSurface, RecordingSurface, RenderError,
    RenderLoop, RenderStopped, Series, MarkerStyle, ViewBounds,
};
pub use crate::system::{FeedExit, SharedPositions, Shutdown, Visualizer};
pub use crate::utils::{init_logging, ConfigError, FeedConfig, RenderConfig, VisualizerConfig};
