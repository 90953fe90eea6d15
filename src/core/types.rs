//! Core data types shared by the feeds and the plot

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a plotted entity: a sensor id or a device fingerprint.
///
/// The backend emits integers for both, but string identifiers are accepted
/// as well so that any scalar key the feed chooses round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionId::Number(n) => write!(f, "{}", n),
            PositionId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for PositionId {
    fn from(value: u64) -> Self {
        PositionId::Number(value)
    }
}

impl From<&str> for PositionId {
    fn from(value: &str) -> Self {
        PositionId::Text(value.to_string())
    }
}

impl From<String> for PositionId {
    fn from(value: String) -> Self {
        PositionId::Text(value)
    }
}

/// Planar position in meters
pub type Position2D = Point2<f64>;

/// Latest complete snapshot of one feed, keyed by identifier
pub type PositionMap = HashMap<PositionId, Position2D>;

/// The two streams the client subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    /// Fixed sensor positions, keyed by `id`
    Sensors,
    /// Computed device positions, keyed by `fingerprint`
    Trilaterations,
}

impl FeedKind {
    pub const ALL: [FeedKind; 2] = [FeedKind::Sensors, FeedKind::Trilaterations];

    /// Name of the record field holding the identifier
    pub fn key_field(&self) -> &'static str {
        match self {
            FeedKind::Sensors => "id",
            FeedKind::Trilaterations => "fingerprint",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Sensors => write!(f, "sensors"),
            FeedKind::Trilaterations => write!(f, "trilaterations"),
        }
    }
}
