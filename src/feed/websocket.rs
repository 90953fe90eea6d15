//! Websocket feed source

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::feed::{FeedConnection, FeedError, FeedResult, FeedSource};

/// Subscribes to a websocket endpoint that pushes JSON snapshots
#[derive(Debug, Clone)]
pub struct WebSocketSource {
    url: String,
}

impl WebSocketSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl FeedSource for WebSocketSource {
    type Connection = WebSocketConnection;

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn connect(&self) -> FeedResult<WebSocketConnection> {
        let (stream, response) = connect_async(self.url.as_str())
            .await
            .map_err(|e| FeedError::ConnectFailed {
                url: self.url.clone(),
                details: e.to_string(),
            })?;

        debug!(url = %self.url, status = %response.status(), "Websocket handshake complete");

        Ok(WebSocketConnection {
            url: self.url.clone(),
            stream,
        })
    }
}

/// One open websocket subscription
pub struct WebSocketConnection {
    url: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl FeedConnection for WebSocketConnection {
    async fn next_payload(&mut self) -> FeedResult<Option<String>> {
        loop {
            let message = match self.stream.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    return Err(FeedError::ConnectionLost {
                        url: self.url.clone(),
                        details: e.to_string(),
                    })
                }
                None => return Ok(None),
            };

            match message {
                Message::Text(text) => return Ok(Some(text)),
                Message::Binary(bytes) => {
                    return String::from_utf8(bytes).map(Some).map_err(|e| {
                        FeedError::UnsupportedFrame {
                            details: format!("binary frame is not UTF-8: {}", e),
                        }
                    })
                }
                Message::Close(frame) => {
                    debug!(url = %self.url, ?frame, "Close frame received");
                    return Ok(None);
                }
                // Control frames carry no snapshot; tungstenite answers pings itself
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            }
        }
    }
}
