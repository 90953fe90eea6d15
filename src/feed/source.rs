//! Feed source abstraction

use std::future::Future;

use crate::feed::FeedResult;

/// An endpoint that can be subscribed to.
///
/// `connect` is called again after every disconnect, so an implementation
/// must be able to produce any number of connections.
pub trait FeedSource: Send + Sync + 'static {
    type Connection: FeedConnection;

    /// Address used in log lines
    fn endpoint(&self) -> &str;

    /// Establish a new subscription
    fn connect(&self) -> impl Future<Output = FeedResult<Self::Connection>> + Send;
}

/// A live subscription delivering one snapshot payload per message
pub trait FeedConnection: Send + 'static {
    /// Wait for the next payload.
    /// Returns Ok(Some(payload)) when a message arrives
    /// Returns Ok(None) once the peer has ended the stream
    /// Returns Err(error) if the frame or the transport failed
    fn next_payload(&mut self) -> impl Future<Output = FeedResult<Option<String>>> + Send;
}
