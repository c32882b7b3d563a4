use serde::Serialize;

use crate::connection::ConnectionState;
use crate::state::event_log::EventLogEntry;

/// Describes a state change that occurred.
///
/// Store mutations return these; the dashboard runtime adds the
/// workflow and prompt notifications that do not touch the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    ConnectionChanged { state: ConnectionState },
    BusinessesReplaced { count: usize },
    BusinessAdded { place_id: String },
    EventLogged { entry: EventLogEntry },
    MeetingCounterIncremented { total: u64 },
    SessionsReplaced { count: usize },
    MeetingsReplaced { count: usize },
    /// A backend workflow reported a terminal event.
    WorkflowFinished { event: String },
    /// The backend is waiting for an operator answer.
    HumanInputRequested {
        request_id: String,
        prompt: Option<String>,
    },
}
