//! Position maps shared between the feed consumers and the render loop.
//!
//! Each map has exactly one writer (the consumer of its feed) and one reader
//! (the render loop). A write swaps in a freshly built map behind an `Arc`,
//! so a reader holding a snapshot never observes a half-applied message.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{FeedKind, PositionMap};

/// Holder of the latest complete snapshot of one feed
#[derive(Debug, Default)]
pub struct PositionSlot {
    current: RwLock<Arc<PositionMap>>,
}

impl PositionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous snapshot and publish `map` in its place.
    pub fn replace(&self, map: PositionMap) {
        let map = Arc::new(map);
        *self.current.write() = map;
    }

    /// Current snapshot. Later replacements do not affect the returned map.
    pub fn snapshot(&self) -> Arc<PositionMap> {
        self.current.read().clone()
    }
}

/// State owned by the visualizer and handed to its three activities.
#[derive(Debug, Default)]
pub struct SharedPositions {
    /// Written by the sensor consumer only.
    sensors: PositionSlot,
    /// Written by the trilateration consumer only.
    trilaterations: PositionSlot,
}

impl SharedPositions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slot(&self, kind: FeedKind) -> &PositionSlot {
        match kind {
            FeedKind::Sensors => &self.sensors,
            FeedKind::Trilaterations => &self.trilaterations,
        }
    }

    pub fn sensors(&self) -> Arc<PositionMap> {
        self.sensors.snapshot()
    }

    pub fn trilaterations(&self) -> Arc<PositionMap> {
        self.trilaterations.snapshot()
    }
}
