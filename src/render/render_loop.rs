//! Periodic redraw of both position maps

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::render::{PlotFrame, PlotSurface, RenderError, RenderResult};
use crate::system::SharedPositions;
use crate::utils::config::RenderConfig;

/// Why and when the render loop stopped
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStopped {
    pub cause: RenderError,
    /// Ticks completed before the failing one
    pub ticks: u64,
}

/// Read-only consumer of the shared maps that redraws on a fixed period.
///
/// A failing tick is never retried: the loop returns and the caller is
/// expected to tear down the feeds.
pub struct RenderLoop<S: PlotSurface> {
    shared: Arc<SharedPositions>,
    surface: S,
    frame: PlotFrame,
    period: Duration,
    ticks: u64,
}

impl<S: PlotSurface> RenderLoop<S> {
    pub fn new(config: &RenderConfig, shared: Arc<SharedPositions>, surface: S) -> Self {
        Self {
            shared,
            surface,
            frame: PlotFrame::new(config),
            period: Duration::from_millis(config.period_ms),
            ticks: 0,
        }
    }

    pub fn frame(&self) -> &PlotFrame {
        &self.frame
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot both maps, update the series and bounds, flush to the surface.
    pub fn tick(&mut self) -> RenderResult<()> {
        let sensors = self.shared.sensors();
        let trilaterations = self.shared.trilaterations();

        self.frame.update(&sensors, &trilaterations)?;
        self.surface.present(&self.frame)?;

        self.ticks += 1;
        Ok(())
    }

    /// Tick every period until a tick fails.
    pub async fn run(mut self) -> RenderStopped {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_ms = self.period.as_millis() as u64, "Render loop started");

        loop {
            interval.tick().await;

            if let Err(cause) = self.tick() {
                error!(error = %cause, ticks = self.ticks, "Render tick failed");
                return RenderStopped {
                    cause,
                    ticks: self.ticks,
                };
            }

            if self.ticks % 200 == 0 {
                debug!(
                    ticks = self.ticks,
                    sensors = self.frame.sensors.len(),
                    trilaterations = self.frame.trilaterations.len(),
                    "Render loop alive"
                );
            }
        }
    }
}
