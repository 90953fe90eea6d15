//! Reconnection policies for feed consumers

use std::time::Duration;

use crate::feed::FeedError;

/// Outcome of a reconnect decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectDecision {
    /// Connect again once the delay has elapsed
    RetryAfter(Duration),
    /// Stop consuming this feed
    GiveUp,
}

/// Decides what a consumer does after losing, or failing to open, its connection.
pub trait ReconnectPolicy: Send + 'static {
    /// `attempt` counts consecutive failures since the last successful
    /// connect, starting at 1.
    fn on_disconnect(&mut self, attempt: u32, error: &FeedError) -> ReconnectDecision;

    /// Called after every successful connect
    fn on_connected(&mut self) {}
}

/// Reconnect after a constant pause, indefinitely
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryForever {
    pub delay: Duration,
}

impl RetryForever {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Reconnect immediately
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl ReconnectPolicy for RetryForever {
    fn on_disconnect(&mut self, _attempt: u32, _error: &FeedError) -> ReconnectDecision {
        ReconnectDecision::RetryAfter(self.delay)
    }
}

/// Doubling delay between `initial` and `max`, optionally capped in attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    pub initial: Duration,
    pub max: Duration,
    pub max_attempts: Option<u32>,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max)
            .min(self.max)
    }
}

impl ReconnectPolicy for ExponentialBackoff {
    fn on_disconnect(&mut self, attempt: u32, _error: &FeedError) -> ReconnectDecision {
        match self.max_attempts {
            Some(limit) if attempt > limit => ReconnectDecision::GiveUp,
            _ => ReconnectDecision::RetryAfter(self.delay_for(attempt)),
        }
    }
}

/// Constant pause, but stop after `attempts` consecutive failures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GiveUpAfter {
    pub attempts: u32,
    pub delay: Duration,
}

impl GiveUpAfter {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

impl ReconnectPolicy for GiveUpAfter {
    fn on_disconnect(&mut self, attempt: u32, _error: &FeedError) -> ReconnectDecision {
        if attempt > self.attempts {
            ReconnectDecision::GiveUp
        } else {
            ReconnectDecision::RetryAfter(self.delay)
        }
    }
}
