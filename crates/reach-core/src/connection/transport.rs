//! The socket seam. Production uses a WebSocket; tests script their own.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{Sink, SinkExt, Stream, StreamExt, future};
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::connection::errors::ConnectionError;

pub type FrameSink = Pin<Box<dyn Sink<String, Error = ConnectionError> + Send>>;
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<String, ConnectionError>> + Send>>;

/// An open channel: text frames out, text frames in.
///
/// The stream ending is the close.
pub struct Link {
    pub sink: FrameSink,
    pub stream: FrameStream,
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link").finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a new channel. Each call is a fresh attempt.
    async fn connect(&self) -> Result<Link, ConnectionError>;

    /// Where this transport connects, for logs.
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: Transport> Transport for Arc<T> {
    async fn connect(&self) -> Result<Link, ConnectionError> {
        (**self).connect().await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// WebSocket transport for the backend's `/ws` endpoint.
#[derive(Debug, Clone)]
pub struct WsTransport {
    url: String,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn connect(&self) -> Result<Link, ConnectionError> {
        let (ws, _response) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|e| ConnectionError::ConnectFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let (sink, stream) = ws.split();

        let sink = sink
            .sink_map_err(|e| ConnectionError::Transport {
                message: e.to_string(),
            })
            .with(|text: String| future::ready(Ok::<_, ConnectionError>(Message::text(text))));

        // Only text frames carry messages; control frames are handled by
        // tungstenite and binary frames are not part of the protocol.
        let stream = stream.filter_map(|msg| {
            future::ready(match msg {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Close(frame)) => {
                    debug!(event = "core.connection.close_frame_received", frame = ?frame);
                    None
                }
                Ok(_) => None,
                Err(e) => Some(Err(ConnectionError::Transport {
                    message: e.to_string(),
                })),
            })
        });

        Ok(Link {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        })
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
