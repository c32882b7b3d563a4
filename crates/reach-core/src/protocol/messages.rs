use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::leads::Business;

/// A message pushed by the backend on the live-update channel.
///
/// Discriminated by the `type` field. Types this client does not know decode
/// to [`InboundMessage::Unknown`] and are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Full state dump sent when a connection opens.
    Init {
        #[serde(default)]
        businesses: Option<Vec<Business>>,
        #[serde(default)]
        recent_events: Option<Vec<AgentEvent>>,
    },
    AgentEvent(AgentEvent),
    HumanInputRequest {
        #[serde(default)]
        prompt: Option<String>,
        request_id: String,
    },
    Heartbeat,
    Keepalive,
    Pong,
    #[serde(other)]
    Unknown,
}

/// Progress report from one of the backend agents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Event names the client reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentEventKind {
    LeadFound,
    SearchCompleted,
    MeetingScheduled,
    SdrCompleted,
    ProcessingCompleted,
    Error,
    Other,
}

impl AgentEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> AgentEventKind {
        match self.event.as_str() {
            "lead_found" => AgentEventKind::LeadFound,
            "search_completed" => AgentEventKind::SearchCompleted,
            "meeting_scheduled" => AgentEventKind::MeetingScheduled,
            "sdr_completed" => AgentEventKind::SdrCompleted,
            "processing_completed" => AgentEventKind::ProcessingCompleted,
            "error" => AgentEventKind::Error,
            _ => AgentEventKind::Other,
        }
    }

    /// Whether this event ends a backend workflow.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind(),
            AgentEventKind::SearchCompleted
                | AgentEventKind::SdrCompleted
                | AgentEventKind::ProcessingCompleted
                | AgentEventKind::Error
        )
    }

    /// Decode `data` as a single business. `None` when there is no payload.
    pub fn business_payload(&self) -> Option<Result<Business, serde_json::Error>> {
        match &self.data {
            None | Some(Value::Null) => None,
            Some(data) => Some(Business::deserialize(data)),
        }
    }

    /// Decode `data.leads` as a list of businesses. `None` when absent.
    pub fn leads_payload(&self) -> Option<Result<Vec<Business>, serde_json::Error>> {
        match self.data.as_ref().and_then(|d| d.get("leads")) {
            None | Some(Value::Null) => None,
            Some(leads) => Some(Vec::<Business>::deserialize(leads)),
        }
    }
}

/// A message sent by the client on the live-update channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Periodic liveness ping.
    Heartbeat,
    /// Reply to a server `heartbeat`.
    HeartbeatAck,
}

impl OutboundMessage {
    pub fn to_json(self) -> String {
        match self {
            OutboundMessage::Heartbeat => r#"{"type":"heartbeat"}"#.to_string(),
            OutboundMessage::HeartbeatAck => r#"{"type":"heartbeat_ack"}"#.to_string(),
        }
    }
}
