//! Streaming feed subscriptions
//!
//! This module provides the source abstraction over the two position feeds,
//! the websocket implementation, reconnection policies and the consumer that
//! keeps a feed's shared map up to date.

pub mod source;
pub mod websocket;
pub mod reconnect;
pub mod consumer;
pub mod mock;
pub mod error;

pub use source::{FeedSource, FeedConnection};
pub use websocket::{WebSocketSource, WebSocketConnection};
pub use reconnect::{ReconnectPolicy, ReconnectDecision, RetryForever, ExponentialBackoff, GiveUpAfter};
pub use consumer::{FeedConsumer, FeedStats};
pub use mock::{ScriptedSource, ScriptedSession, ScriptedFrame};
pub use error::{FeedError, FeedResult, RecoveryStrategy};
