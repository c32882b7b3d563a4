use serde::Serialize;

use crate::connection::ConnectionState;
use crate::leads::Business;
use crate::meetings::Meeting;
use crate::outreach::SdrSession;
use crate::state::event_log::EventLogEntry;
use crate::state::stats::Stats;

/// Read-only copy of the dashboard, published after every change.
///
/// This is everything a renderer needs. `meetings` already includes the
/// derived follow-ups and `events` is newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub connection: ConnectionState,
    pub stats: Stats,
    pub businesses: Vec<Business>,
    pub sessions: Vec<SdrSession>,
    pub meetings: Vec<Meeting>,
    pub events: Vec<EventLogEntry>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            stats: Stats::default(),
            businesses: Vec::new(),
            sessions: Vec::new(),
            meetings: Vec::new(),
            events: Vec::new(),
        }
    }
}
