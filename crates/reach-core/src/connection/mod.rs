//! # Live-update channel
//!
//! One connection at a time to the backend's `/ws` endpoint. While open, a
//! `heartbeat` is sent every interval. Every close schedules exactly one
//! reconnect after a constant delay, forever, until shutdown. A transport
//! error stops the heartbeat and waits for the close; if none comes within
//! the grace window the close is forced.

pub mod errors;
pub mod lifecycle;
pub mod manager;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;

pub use errors::ConnectionError;
pub use lifecycle::{ConnectionState, Lifecycle, LifecycleAction};
pub use manager::{ConnectionHandle, ConnectionManager, ConnectionTiming, LinkEvent};
pub use transport::{Link, Transport, WsTransport};
