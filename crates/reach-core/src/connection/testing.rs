//! In-memory transport for exercising the connection manager.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::SinkExt;
use futures::channel::mpsc;
use tokio::time::Instant;

use crate::connection::errors::ConnectionError;
use crate::connection::transport::{Link, Transport};

/// The server side of an in-memory link.
pub struct RemoteEnd {
    /// Frames to deliver to the client. Dropping it closes the link.
    pub to_client: mpsc::UnboundedSender<Result<String, ConnectionError>>,
    /// Frames the client sent.
    pub from_client: mpsc::UnboundedReceiver<String>,
}

impl RemoteEnd {
    pub fn send(&self, frame: &str) {
        self.to_client
            .unbounded_send(Ok(frame.to_string()))
            .unwrap();
    }

    pub fn fail(&self, message: &str) {
        self.to_client
            .unbounded_send(Err(ConnectionError::Transport {
                message: message.to_string(),
            }))
            .unwrap();
    }

    /// Everything the client has sent so far.
    pub fn received(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(Some(frame)) = self.from_client.try_next() {
            frames.push(frame);
        }
        frames
    }
}

pub fn link_pair() -> (Link, RemoteEnd) {
    let (to_client, client_rx) = mpsc::unbounded();
    let (client_tx, from_client) = mpsc::unbounded::<String>();

    let link = Link {
        sink: Box::pin(client_tx.sink_map_err(|e| ConnectionError::Transport {
            message: e.to_string(),
        })),
        stream: Box::pin(client_rx),
    };

    (
        link,
        RemoteEnd {
            to_client,
            from_client,
        },
    )
}

/// Hands out pre-built links in order, then refuses.
#[derive(Default)]
pub struct ScriptedTransport {
    links: Mutex<VecDeque<Link>>,
    attempts: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a link and return the server side of it.
    pub fn push_link(&self) -> RemoteEnd {
        let (link, remote) = link_pair();
        self.links.lock().unwrap().push_back(link);
        remote
    }

    pub fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn connect(&self) -> Result<Link, ConnectionError> {
        self.attempts.lock().unwrap().push(Instant::now());
        self.links
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ConnectionError::ConnectFailed {
                url: "scripted".to_string(),
                message: "connection refused".to_string(),
            })
    }

    fn endpoint(&self) -> &str {
        "scripted"
    }
}
