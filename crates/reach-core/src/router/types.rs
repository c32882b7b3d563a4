use crate::protocol::OutboundMessage;
use crate::state::Event;

/// Side effects the runtime must carry out after routing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a message back on the live-update channel.
    Reply(OutboundMessage),
    /// Fetch a fresh SDR session snapshot.
    RefetchSessions,
}

/// Outcome of routing one inbound message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Routed {
    /// Store changes followed by workflow and prompt notifications.
    pub events: Vec<Event>,
    pub effects: Vec<Effect>,
}

impl Routed {
    pub fn is_noop(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }
}
