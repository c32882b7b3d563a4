use crate::connection::ConnectionState;
use crate::leads::Business;
use crate::meetings::Meeting;
use crate::outreach::SdrSession;
use crate::state::event_log::EventLogEntry;

/// All state mutations the dashboard store accepts.
///
/// Each variant is one self-contained change. The router and the dashboard
/// runtime translate inbound messages and fetch results into commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the business collection wholesale (the `init` snapshot).
    ReplaceBusinesses { businesses: Vec<Business> },
    /// Insert businesses whose `place_id` is not yet present.
    UpsertBusinesses { businesses: Vec<Business> },
    /// Prepend one entry to the event log.
    LogEvent { entry: EventLogEntry },
    /// Count a pushed `meeting_scheduled` event.
    IncrementMeetingCounter,
    /// Replace the SDR session snapshot from a poll.
    ReplaceSessions { sessions: Vec<SdrSession> },
    /// Replace the external meetings from a poll.
    ReplaceMeetings { meetings: Vec<Meeting> },
    /// Record a live-channel connectivity change.
    SetConnection { state: ConnectionState },
}
