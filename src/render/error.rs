//! Render error types

use thiserror::Error;

/// Failures that end the render loop
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The plot window is gone
    #[error("Plot surface closed")]
    SurfaceClosed,
    /// A point cannot be placed on the plot
    #[error("Non-finite coordinate for {id} in series '{series}'")]
    NonFiniteCoordinate { series: String, id: String },
    /// Backend-specific drawing failure
    #[error("Plot surface failure: {details}")]
    SurfaceFailure { details: String },
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
