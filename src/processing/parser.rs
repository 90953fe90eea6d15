use crate::core::{FeedKind, Position2D, PositionId, PositionMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of a sensor snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub id: PositionId,
    pub x: f64,
    pub y: f64,
}

/// One entry of a trilateration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrilaterationRecord {
    pub fingerprint: PositionId,
    pub x: f64,
    pub y: f64,
}

/// A record that contributes one entry to a position map
pub trait PositionRecord {
    fn into_entry(self) -> (PositionId, Position2D);
}

impl PositionRecord for SensorRecord {
    fn into_entry(self) -> (PositionId, Position2D) {
        (self.id, Position2D::new(self.x, self.y))
    }
}

impl PositionRecord for TrilaterationRecord {
    fn into_entry(self) -> (PositionId, Position2D) {
        (self.fingerprint, Position2D::new(self.x, self.y))
    }
}

/// Errors that can occur while decoding a snapshot payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid {feed} snapshot: {details}")]
    InvalidSnapshot { feed: FeedKind, details: String },
}

/// Decodes feed payloads into complete position maps
#[derive(Debug, Clone, Copy)]
pub struct SnapshotParser {
    kind: FeedKind,
}

impl SnapshotParser {
    pub fn new(kind: FeedKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Parse one message into the map it describes.
    ///
    /// The payload is a JSON array of records; a repeated identifier keeps
    /// the last record carrying it. The result replaces the previous map
    /// wholesale, so nothing from earlier payloads survives.
    pub fn parse(&self, payload: &str) -> Result<PositionMap, ParseError> {
        match self.kind {
            FeedKind::Sensors => self.parse_records::<SensorRecord>(payload),
            FeedKind::Trilaterations => self.parse_records::<TrilaterationRecord>(payload),
        }
    }

    fn parse_records<R>(&self, payload: &str) -> Result<PositionMap, ParseError>
    where
        R: PositionRecord + for<'de> Deserialize<'de>,
    {
        let records: Vec<R> = serde_json::from_str(payload).map_err(|e| ParseError::InvalidSnapshot {
            feed: self.kind,
            details: e.to_string(),
        })?;

        Ok(records.into_iter().map(PositionRecord::into_entry).collect())
    }
}
