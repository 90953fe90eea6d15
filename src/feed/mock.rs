//! Scripted feed source for testing and development

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::feed::{FeedConnection, FeedError, FeedResult, FeedSource};

/// One frame delivered by a scripted connection
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedFrame {
    /// A text payload
    Text(String),
    /// A frame the transport cannot turn into text
    Undecodable,
    /// Transport failure; the connection is dead afterwards
    Drop,
}

/// Outcome of one connect attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedSession {
    /// The endpoint refuses the connection
    Refused,
    /// The connection delivers these frames, then the peer closes it
    Frames(Vec<ScriptedFrame>),
}

/// Feed source replaying a fixed list of sessions.
///
/// Once the script is exhausted, `connect` never completes, which behaves
/// like an endpoint that stays unreachable without erroring.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    endpoint: String,
    sessions: Arc<Mutex<VecDeque<ScriptedSession>>>,
    connect_attempts: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sessions: Arc::new(Mutex::new(VecDeque::new())),
            connect_attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_session(self, session: ScriptedSession) -> Self {
        self.sessions.lock().push_back(session);
        self
    }

    /// Session delivering the given text payloads, then closing
    pub fn with_payloads<I, T>(self, payloads: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let frames = payloads
            .into_iter()
            .map(|p| ScriptedFrame::Text(p.into()))
            .collect();
        self.with_session(ScriptedSession::Frames(frames))
    }

    /// Number of times `connect` has been called
    pub fn connect_attempts(&self) -> u32 {
        self.connect_attempts.load(Ordering::SeqCst)
    }

    /// Sessions not yet consumed
    pub fn remaining_sessions(&self) -> usize {
        self.sessions.lock().len()
    }
}

impl FeedSource for ScriptedSource {
    type Connection = ScriptedConnection;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn connect(&self) -> FeedResult<ScriptedConnection> {
        self.connect_attempts.fetch_add(1, Ordering::SeqCst);
        let next = self.sessions.lock().pop_front();

        match next {
            Some(ScriptedSession::Refused) => Err(FeedError::ConnectFailed {
                url: self.endpoint.clone(),
                details: "connection refused".to_string(),
            }),
            Some(ScriptedSession::Frames(frames)) => Ok(ScriptedConnection {
                endpoint: self.endpoint.clone(),
                frames: frames.into(),
                dropped: false,
            }),
            None => std::future::pending().await,
        }
    }
}

/// Connection handed out by [`ScriptedSource`]
#[derive(Debug)]
pub struct ScriptedConnection {
    endpoint: String,
    frames: VecDeque<ScriptedFrame>,
    dropped: bool,
}

impl FeedConnection for ScriptedConnection {
    async fn next_payload(&mut self) -> FeedResult<Option<String>> {
        // Give other tasks a turn between messages, as a real socket read would
        tokio::task::yield_now().await;

        if self.dropped {
            return Err(FeedError::ConnectionLost {
                url: self.endpoint.clone(),
                details: "connection already dropped".to_string(),
            });
        }

        match self.frames.pop_front() {
            Some(ScriptedFrame::Text(text)) => Ok(Some(text)),
            Some(ScriptedFrame::Undecodable) => Err(FeedError::UnsupportedFrame {
                details: "binary frame is not UTF-8".to_string(),
            }),
            Some(ScriptedFrame::Drop) => {
                self.dropped = true;
                Err(FeedError::ConnectionLost {
                    url: self.endpoint.clone(),
                    details: "connection reset by peer".to_string(),
                })
            }
            None => Ok(None),
        }
    }
}
