//! Feed error types and handling

use thiserror::Error;

use crate::processing::ParseError;

/// Failures seen while subscribed to a feed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The endpoint could not be reached or refused the handshake
    #[error("Failed to connect to {url}: {details}")]
    ConnectFailed { url: String, details: String },
    /// The transport failed mid-stream
    #[error("Connection to {url} lost: {details}")]
    ConnectionLost { url: String, details: String },
    /// The peer ended the stream
    #[error("Stream {url} closed by peer")]
    StreamClosed { url: String },
    /// A message arrived but did not decode into a snapshot
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] ParseError),
    /// A frame that cannot carry a snapshot (e.g. non UTF-8 binary)
    #[error("Unsupported frame: {details}")]
    UnsupportedFrame { details: String },
}

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// What a consumer does after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Drop the connection and ask the reconnect policy how to proceed
    Reconnect,
    /// Ignore this message and keep reading
    Skip,
}

impl FeedError {
    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            FeedError::ConnectFailed { .. } => RecoveryStrategy::Reconnect,
            FeedError::ConnectionLost { .. } => RecoveryStrategy::Reconnect,
            FeedError::StreamClosed { .. } => RecoveryStrategy::Reconnect,
            FeedError::MalformedPayload(_) => RecoveryStrategy::Skip,
            FeedError::UnsupportedFrame { .. } => RecoveryStrategy::Skip,
        }
    }

    /// Whether the current connection survives this error
    pub fn keeps_connection(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Skip)
    }
}
