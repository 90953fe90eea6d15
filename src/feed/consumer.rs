//! Long-lived feed consumer
//!
//! Holds a subscription to one feed and replaces that feed's position map
//! with every snapshot received. Connection failures are handed to a
//! [`ReconnectPolicy`]; only a policy that gives up ends the consumer.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::core::FeedKind;
use crate::feed::{
    FeedConnection, FeedError, FeedResult, FeedSource, ReconnectDecision, ReconnectPolicy,
};
use crate::processing::SnapshotParser;
use crate::system::SharedPositions;

/// Counters kept by a consumer over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Successful connects
    pub connections: u32,
    /// Failed connects and lost connections
    pub disconnects: u32,
    /// Snapshots written to the shared map
    pub snapshots_applied: u64,
    /// Messages ignored because they did not decode
    pub payloads_skipped: u64,
}

/// Consumer of one feed, the only writer of that feed's map
pub struct FeedConsumer<S: FeedSource, P: ReconnectPolicy> {
    kind: FeedKind,
    source: S,
    policy: P,
    parser: SnapshotParser,
    shared: Arc<SharedPositions>,
    stats: FeedStats,
}

impl<S: FeedSource, P: ReconnectPolicy> FeedConsumer<S, P> {
    pub fn new(kind: FeedKind, source: S, policy: P, shared: Arc<SharedPositions>) -> Self {
        Self {
            kind,
            source,
            policy,
            parser: SnapshotParser::new(kind),
            shared,
            stats: FeedStats::default(),
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Consume the feed until the reconnect policy gives up.
    ///
    /// Cancellation (dropping or aborting the future) takes effect at the
    /// next await: a pending connect, a pending read or a reconnect pause.
    pub async fn run(mut self) -> FeedStats {
        let mut failures: u32 = 0;

        loop {
            let error = match self.source.connect().await {
                Ok(mut connection) => {
                    self.stats.connections += 1;
                    failures = 0;
                    self.policy.on_connected();
                    info!(
                        feed = %self.kind,
                        endpoint = self.source.endpoint(),
                        "Connected to {} websocket", self.kind
                    );
                    self.consume(&mut connection).await
                }
                Err(e) => e,
            };

            failures = failures.saturating_add(1);
            self.stats.disconnects += 1;
            warn!(feed = %self.kind, error = %error, attempt = failures, "Feed disconnected");

            match self.policy.on_disconnect(failures, &error) {
                ReconnectDecision::RetryAfter(delay) => {
                    info!(
                        feed = %self.kind,
                        delay_ms = delay.as_millis() as u64,
                        snapshots = self.stats.snapshots_applied,
                        "Reconnecting to {} websocket", self.kind
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                ReconnectDecision::GiveUp => {
                    error!(
                        feed = %self.kind,
                        attempts = failures,
                        "Giving up on {} websocket; its plot series stays frozen", self.kind
                    );
                    return self.stats;
                }
            }
        }
    }

    /// Read until the connection ends; returns the error that ended it.
    async fn consume(&mut self, connection: &mut S::Connection) -> FeedError {
        loop {
            let outcome = match connection.next_payload().await {
                Ok(Some(payload)) => self.apply(&payload).map(|_| ()),
                Ok(None) => {
                    return FeedError::StreamClosed {
                        url: self.source.endpoint().to_string(),
                    }
                }
                Err(e) => Err(e),
            };

            if let Err(e) = outcome {
                if !e.keeps_connection() {
                    return e;
                }
                self.stats.payloads_skipped += 1;
                warn!(feed = %self.kind, error = %e, "Skipping payload");
            }
        }
    }

    /// Decode one payload and publish it as the feed's whole map.
    ///
    /// Returns the number of entries now in the map. On error the previous
    /// snapshot stays in place.
    pub fn apply(&mut self, payload: &str) -> FeedResult<usize> {
        let map = self.parser.parse(payload)?;
        let count = map.len();

        self.shared.slot(self.kind).replace(map);
        self.stats.snapshots_applied += 1;
        debug!(feed = %self.kind, entries = count, "Snapshot applied");

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position2D, PositionId, PositionMap};
    use crate::feed::mock::{ScriptedFrame, ScriptedSession, ScriptedSource};
    use crate::feed::{GiveUpAfter, RetryForever};
    use std::time::Duration;

    const SCENARIO_A: &str = r#"[{"id":1,"x":0.0,"y":0.0},{"id":2,"x":3.0,"y":4.0}]"#;

    fn scenario_a_map() -> PositionMap {
        [
            (PositionId::Number(1), Position2D::new(0.0, 0.0)),
            (PositionId::Number(2), Position2D::new(3.0, 4.0)),
        ]
        .into_iter()
        .collect()
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[test]
    fn test_apply_replaces_whole_map() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://sensors");
        let mut consumer =
            FeedConsumer::new(FeedKind::Sensors, source, RetryForever::immediate(), shared.clone());

        assert_eq!(consumer.apply(SCENARIO_A).unwrap(), 2);
        assert_eq!(*shared.sensors(), scenario_a_map());

        assert_eq!(consumer.apply(r#"[{"id":7,"x":-1.0,"y":2.0}]"#).unwrap(), 1);
        let current = shared.sensors();
        assert_eq!(current.len(), 1);
        assert_eq!(current[&PositionId::Number(7)], Position2D::new(-1.0, 2.0));
        assert_eq!(consumer.stats().snapshots_applied, 2);
    }

    #[test]
    fn test_apply_malformed_keeps_previous_snapshot() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://sensors");
        let mut consumer =
            FeedConsumer::new(FeedKind::Sensors, source, RetryForever::immediate(), shared.clone());

        consumer.apply(SCENARIO_A).unwrap();
        let error = consumer.apply(r#"[{"id":1}]"#).unwrap_err();

        assert!(error.keeps_connection());
        assert_eq!(*shared.sensors(), scenario_a_map());
    }

    #[tokio::test]
    async fn test_trilateration_snapshot_keyed_by_fingerprint() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://trilaterations")
            .with_payloads([r#"[{"fingerprint":"ap1","x":1.5,"y":2.5}]"#]);
        let consumer = FeedConsumer::new(
            FeedKind::Trilaterations,
            source,
            RetryForever::immediate(),
            shared.clone(),
        );

        let handle = tokio::spawn(consumer.run());
        wait_until(|| !shared.trilaterations().is_empty()).await;

        let current = shared.trilaterations();
        assert_eq!(current.len(), 1);
        assert_eq!(current[&PositionId::from("ap1")], Position2D::new(1.5, 2.5));
        assert!(shared.sensors().is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_reconnects_after_drop_and_resumes_updates() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://sensors")
            .with_session(ScriptedSession::Frames(vec![
                ScriptedFrame::Text(SCENARIO_A.to_string()),
                ScriptedFrame::Drop,
            ]))
            .with_session(ScriptedSession::Refused)
            .with_payloads([r#"[{"id":3,"x":5.0,"y":5.0}]"#]);
        let probe = source.clone();
        let consumer =
            FeedConsumer::new(FeedKind::Sensors, source, RetryForever::immediate(), shared.clone());

        let handle = tokio::spawn(consumer.run());
        wait_until(|| shared.sensors().contains_key(&PositionId::Number(3))).await;

        assert_eq!(shared.sensors().len(), 1);
        // drop, refused, then the third session closes and a fourth connect blocks
        wait_until(|| probe.connect_attempts() == 4).await;
        assert_eq!(probe.remaining_sessions(), 0);
        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_snapshot_after_reconnect_clears_map() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://sensors")
            .with_payloads([SCENARIO_A])
            .with_payloads(["[]"]);
        let probe = source.clone();
        let consumer =
            FeedConsumer::new(FeedKind::Sensors, source, RetryForever::immediate(), shared.clone());

        let handle = tokio::spawn(consumer.run());
        wait_until(|| probe.connect_attempts() == 3).await;

        assert!(shared.sensors().is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_bad_frames_do_not_drop_connection() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://sensors").with_session(ScriptedSession::Frames(vec![
            ScriptedFrame::Text(SCENARIO_A.to_string()),
            ScriptedFrame::Text("{not json".to_string()),
            ScriptedFrame::Undecodable,
            ScriptedFrame::Text(r#"[{"id":2,"x":3.0,"y":4.0}]"#.to_string()),
        ]));
        let consumer = FeedConsumer::new(
            FeedKind::Sensors,
            source,
            GiveUpAfter::new(0, Duration::ZERO),
            shared.clone(),
        );

        let stats = consumer.run().await;

        assert_eq!(stats.connections, 1);
        assert_eq!(stats.snapshots_applied, 2);
        assert_eq!(stats.payloads_skipped, 2);
        assert_eq!(shared.sensors().len(), 1);
    }

    #[tokio::test]
    async fn test_policy_give_up_ends_consumer() {
        let shared = SharedPositions::new();
        let source = ScriptedSource::new("ws://sensors")
            .with_session(ScriptedSession::Refused)
            .with_session(ScriptedSession::Refused)
            .with_session(ScriptedSession::Refused);
        let probe = source.clone();
        let consumer = FeedConsumer::new(
            FeedKind::Sensors,
            source,
            GiveUpAfter::new(2, Duration::ZERO),
            shared.clone(),
        );

        let stats = consumer.run().await;

        assert_eq!(probe.connect_attempts(), 3);
        assert_eq!(stats.connections, 0);
        assert_eq!(stats.disconnects, 3);
        assert!(shared.sensors().is_empty());
    }
}
