//! Wire format of the live-update channel.

pub mod messages;

pub use messages::{AgentEvent, AgentEventKind, InboundMessage, OutboundMessage};

/// Decode one text frame from the live-update channel.
pub fn decode_inbound(raw: &str) -> Result<InboundMessage, serde_json::Error> {
    serde_json::from_str(raw)
}
