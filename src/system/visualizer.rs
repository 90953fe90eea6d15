//! Visualizer coordinator.
//!
//! Owns the shared position maps, spawns one consumer task per feed and
//! drives the render loop. Feeds recover from their own failures; a render
//! failure is final and cancels both consumers.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::core::FeedKind;
use crate::feed::{FeedConsumer, FeedSource, FeedStats, ReconnectPolicy, WebSocketSource};
use crate::render::{PlotSurface, RenderLoop, RenderStopped};
use crate::system::SharedPositions;
use crate::utils::config::{ConfigError, VisualizerConfig};

/// How a feed consumer task ended
#[derive(Debug, Clone, PartialEq)]
pub enum FeedExit {
    /// Aborted by the coordinator
    Cancelled,
    /// Its reconnect policy gave up before shutdown
    GaveUp(FeedStats),
    /// The task panicked
    Panicked(String),
}

/// Summary returned once the visualizer has stopped
#[derive(Debug, Clone, PartialEq)]
pub struct Shutdown {
    pub render: RenderStopped,
    pub feeds: Vec<(FeedKind, FeedExit)>,
}

impl Shutdown {
    pub fn feed_exit(&self, kind: FeedKind) -> Option<&FeedExit> {
        self.feeds.iter().find(|(k, _)| *k == kind).map(|(_, exit)| exit)
    }
}

/// Top-level object wiring the feeds to the plot
pub struct Visualizer {
    config: VisualizerConfig,
    shared: Arc<SharedPositions>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        let validation = config.validate();
        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        config.ensure_valid()?;

        Ok(Self {
            config,
            shared: SharedPositions::new(),
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn shared(&self) -> Arc<SharedPositions> {
        self.shared.clone()
    }

    /// Consumer writing into this visualizer's map for `kind`
    pub fn consumer<S, P>(&self, kind: FeedKind, source: S, policy: P) -> FeedConsumer<S, P>
    where
        S: FeedSource,
        P: ReconnectPolicy,
    {
        FeedConsumer::new(kind, source, policy, self.shared.clone())
    }

    /// Subscribe to the configured websocket endpoints and draw on `surface`
    /// until the render loop stops.
    pub async fn run<S: PlotSurface>(self, surface: S) -> Shutdown {
        let sensors = self.consumer(
            FeedKind::Sensors,
            WebSocketSource::new(self.config.sensors.url.clone()),
            self.config.sensors.reconnect_policy(),
        );
        let trilaterations = self.consumer(
            FeedKind::Trilaterations,
            WebSocketSource::new(self.config.trilaterations.url.clone()),
            self.config.trilaterations.reconnect_policy(),
        );

        self.run_with(sensors, trilaterations, surface).await
    }

    /// Run the given consumers alongside the render loop.
    ///
    /// Returns after the render loop stops and both consumer tasks have
    /// been cancelled and joined.
    pub async fn run_with<A, P, B, Q, S>(
        self,
        sensors: FeedConsumer<A, P>,
        trilaterations: FeedConsumer<B, Q>,
        surface: S,
    ) -> Shutdown
    where
        A: FeedSource,
        P: ReconnectPolicy,
        B: FeedSource,
        Q: ReconnectPolicy,
        S: PlotSurface,
    {
        let feeds: Vec<(FeedKind, JoinHandle<FeedStats>)> = vec![
            (sensors.kind(), tokio::spawn(sensors.run())),
            (trilaterations.kind(), tokio::spawn(trilaterations.run())),
        ];

        let render = RenderLoop::new(&self.config.render, self.shared.clone(), surface);
        let stopped = render.run().await;

        info!(cause = %stopped.cause, "Render loop stopped, cancelling feed consumers");
        for (_, handle) in &feeds {
            handle.abort();
        }

        let mut exits = Vec::with_capacity(feeds.len());
        for (kind, handle) in feeds {
            let exit = match handle.await {
                Ok(stats) => FeedExit::GaveUp(stats),
                Err(e) if e.is_cancelled() => FeedExit::Cancelled,
                Err(e) => FeedExit::Panicked(e.to_string()),
            };
            info!(feed = %kind, exit = ?exit, "Feed consumer stopped");
            exits.push((kind, exit));
        }

        Shutdown {
            render: stopped,
            feeds: exits,
        }
    }
}
