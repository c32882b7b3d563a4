use std::collections::VecDeque;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::protocol::AgentEvent;

const DEFAULT_AGENT_TYPE: &str = "system";

/// One line of the agent activity log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub agent_type: String,
    pub message: String,
    /// Event name, kept for consumers that filter on it.
    pub event: String,
}

impl EventLogEntry {
    /// Build a log entry, filling gaps the backend left.
    ///
    /// A missing or unparseable timestamp becomes `received_at`.
    pub fn from_agent_event(evt: &AgentEvent, received_at: DateTime<Utc>) -> Self {
        let agent_type = evt
            .agent_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AGENT_TYPE)
            .to_string();
        let message = evt
            .message
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&evt.event)
            .to_string();
        let timestamp = evt
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(received_at);

        Self {
            timestamp,
            agent_type,
            message,
            event: evt.event.clone(),
        }
    }
}

/// Accepts RFC 3339 and offset-less ISO 8601 (read as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Bounded log, newest entry first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an entry, dropping the oldest beyond capacity.
    pub fn push(&mut self, entry: EventLogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
