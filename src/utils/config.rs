use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::core::{
    FeedKind, BOUNDS_MARGIN, PLOT_TITLE, RECONNECT_DELAY_MS, RENDER_PERIOD_MS, SENSORS_LABEL,
    SENSORS_WS_URL, TRILATERATIONS_LABEL, TRILATERATIONS_WS_URL, X_AXIS_LABEL, Y_AXIS_LABEL,
};
use crate::feed::RetryForever;

/// Top-level visualizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Sensor position feed
    pub sensors: FeedConfig,
    /// Trilateration position feed
    pub trilaterations: FeedConfig,
    /// Plot and redraw settings
    pub render: RenderConfig,
    /// Enable debug logging
    pub debug_logging: bool,
}

/// Settings of one feed subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Websocket endpoint (`ws://`)
    pub url: String,
    /// Pause before each reconnection attempt (milliseconds)
    pub reconnect_delay_ms: u64,
}

/// Plot appearance and cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Redraw period (milliseconds)
    pub period_ms: u64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub sensors_label: String,
    pub trilaterations_label: String,
    /// Initial window size in points
    pub window_width: f32,
    pub window_height: f32,
    /// Fraction of the data span added around the view
    pub bounds_margin: f64,
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("Invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether configuration is valid
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<ConfigError>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            sensors: FeedConfig::new(SENSORS_WS_URL),
            trilaterations: FeedConfig::new(TRILATERATIONS_WS_URL),
            render: RenderConfig::default(),
            debug_logging: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            period_ms: RENDER_PERIOD_MS,
            title: PLOT_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            sensors_label: SENSORS_LABEL.to_string(),
            trilaterations_label: TRILATERATIONS_LABEL.to_string(),
            window_width: 1000.0,
            window_height: 1000.0,
            bounds_margin: BOUNDS_MARGIN,
        }
    }
}

impl FeedConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay_ms: RECONNECT_DELAY_MS,
        }
    }

    pub fn with_reconnect_delay(mut self, delay_ms: u64) -> Self {
        self.reconnect_delay_ms = delay_ms;
        self
    }

    /// Reconnect policy described by this configuration
    pub fn reconnect_policy(&self) -> RetryForever {
        RetryForever::new(Duration::from_millis(self.reconnect_delay_ms))
    }
}

impl VisualizerConfig {
    pub fn feed(&self, kind: FeedKind) -> &FeedConfig {
        match kind {
            FeedKind::Sensors => &self.sensors,
            FeedKind::Trilaterations => &self.trilaterations,
        }
    }

    /// Check every parameter, collecting all problems
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for kind in FeedKind::ALL {
            let feed = self.feed(kind);

            if !feed.url.starts_with("ws://") {
                result.errors.push(ConfigError::InvalidParameter {
                    parameter: format!("{}.url", kind),
                    value: feed.url.clone(),
                    reason: "must be a ws:// URL".to_string(),
                });
            }

            if feed.reconnect_delay_ms == 0 {
                result.warnings.push(format!(
                    "{} feed reconnects without pause; an unreachable endpoint is retried in a tight loop",
                    kind
                ));
            }
        }

        let render = &self.render;

        if render.period_ms == 0 {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "render.period_ms".to_string(),
                value: render.period_ms.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        } else if render.period_ms < 16 {
            result.warnings.push(format!(
                "Render period {}ms is shorter than a typical display refresh",
                render.period_ms
            ));
        }

        if !render.bounds_margin.is_finite() || render.bounds_margin < 0.0 {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "render.bounds_margin".to_string(),
                value: render.bounds_margin.to_string(),
                reason: "must be a finite, non-negative fraction".to_string(),
            });
        }

        if !(render.window_width > 0.0 && render.window_height > 0.0) {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "render.window_size".to_string(),
                value: format!("{}x{}", render.window_width, render.window_height),
                reason: "must be positive".to_string(),
            });
        }

        result.is_valid = result.errors.is_empty();
        result
    }

    /// Validate and return the first error, if any
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        match self.validate().errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
