use tokio::sync::{broadcast, mpsc, watch};

use crate::meetings::Meeting;
use crate::outreach::SdrSession;
use crate::state::{DashboardSnapshot, Event};

/// Work for the dashboard runtime besides live-channel traffic.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardInput {
    /// Poll `/api/sdr_sessions`.
    RefreshSessions,
    /// Poll `/api/meetings`.
    RefreshMeetings,
    SessionsFetched(Vec<SdrSession>),
    MeetingsFetched(Vec<Meeting>),
}

/// Consumer ends of the runtime: published state, change events and input.
#[derive(Debug, Clone)]
pub struct DashboardChannels {
    pub snapshot: watch::Receiver<DashboardSnapshot>,
    pub events: broadcast::Sender<Event>,
    pub inputs: mpsc::UnboundedSender<DashboardInput>,
}

impl DashboardChannels {
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn current(&self) -> DashboardSnapshot {
        self.snapshot.borrow().clone()
    }
}
