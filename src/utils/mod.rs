//! Utility modules for configuration and logging

pub mod config;
pub mod logging;

pub use config::{ConfigError, FeedConfig, RenderConfig, ValidationResult, VisualizerConfig};
pub use logging::init_logging;
