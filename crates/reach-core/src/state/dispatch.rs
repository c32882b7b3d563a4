use std::collections::HashSet;
use std::convert::Infallible;

use tracing::{debug, warn};

use crate::connection::ConnectionState;
use crate::leads::Business;
use crate::meetings::{self, Meeting};
use crate::outreach::SdrSession;
use crate::state::event_log::{EventLog, EventLogEntry};
use crate::state::events::Event;
use crate::state::snapshot::DashboardSnapshot;
use crate::state::stats::Stats;
use crate::state::store::Store;
use crate::state::types::Command;

/// In-memory view of the backend: leads, outreach, meetings and activity.
///
/// Owned by a single task. Every mutation goes through [`Store::dispatch`].
#[derive(Debug, Clone)]
pub struct DashboardStore {
    businesses: Vec<Business>,
    known_place_ids: HashSet<String>,
    sessions: Vec<SdrSession>,
    external_meetings: Vec<Meeting>,
    meeting_counter: u64,
    event_log: EventLog,
    connection: ConnectionState,
}

impl DashboardStore {
    pub fn new(event_log_capacity: usize) -> Self {
        Self {
            businesses: Vec::new(),
            known_place_ids: HashSet::new(),
            sessions: Vec::new(),
            external_meetings: Vec::new(),
            meeting_counter: 0,
            event_log: EventLog::new(event_log_capacity),
            connection: ConnectionState::Disconnected,
        }
    }

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn sessions(&self) -> &[SdrSession] {
        &self.sessions
    }

    pub fn external_meetings(&self) -> &[Meeting] {
        &self.external_meetings
    }

    /// External meetings followed by meetings derived from outreach.
    pub fn meetings(&self) -> Vec<Meeting> {
        meetings::combine(&self.external_meetings, &self.sessions)
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn meeting_counter(&self) -> u64 {
        self.meeting_counter
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Headline numbers. `meeting_scheduled` pushes are tracked separately
    /// in [`Self::meeting_counter`] and do not feed `meetings`.
    pub fn stats(&self) -> Stats {
        Stats::derive(&self.businesses, &self.sessions, &self.external_meetings)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            connection: self.connection,
            stats: self.stats(),
            businesses: self.businesses.clone(),
            sessions: self.sessions.clone(),
            meetings: self.meetings(),
            events: self.event_log.iter().cloned().collect(),
        }
    }

    fn replace_businesses(&mut self, businesses: Vec<Business>) -> Vec<Event> {
        let mut seen = HashSet::with_capacity(businesses.len());
        let mut kept = Vec::with_capacity(businesses.len());
        for business in with_place_id(businesses) {
            if seen.insert(business.place_id.clone()) {
                kept.push(business);
            } else {
                debug!(
                    event = "core.state.duplicate_lead_dropped",
                    place_id = %business.place_id
                );
            }
        }

        let count = kept.len();
        self.businesses = kept;
        self.known_place_ids = seen;
        vec![Event::BusinessesReplaced { count }]
    }

    fn upsert_businesses(&mut self, businesses: Vec<Business>) -> Vec<Event> {
        let mut events = Vec::new();
        for business in with_place_id(businesses) {
            if self.known_place_ids.insert(business.place_id.clone()) {
                events.push(Event::BusinessAdded {
                    place_id: business.place_id.clone(),
                });
                self.businesses.push(business);
            }
        }
        events
    }
}

/// Drop leads that lack their identity key; the rest of the batch applies.
fn with_place_id(businesses: Vec<Business>) -> impl Iterator<Item = Business> {
    businesses.into_iter().enumerate().filter_map(|(index, business)| {
        if business.place_id.is_empty() {
            warn!(
                event = "core.state.lead_without_place_id",
                index = index,
                business_name = business.display_name()
            );
            None
        } else {
            Some(business)
        }
    })
}

impl Store for DashboardStore {
    type Error = Infallible;

    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, Infallible> {
        debug!(event = "core.state.dispatch_started", command = ?cmd);

        let events = match cmd {
            Command::ReplaceBusinesses { businesses } => self.replace_businesses(businesses),
            Command::UpsertBusinesses { businesses } => self.upsert_businesses(businesses),
            Command::LogEvent { entry } => {
                self.event_log.push(entry.clone());
                vec![Event::EventLogged { entry }]
            }
            Command::IncrementMeetingCounter => {
                self.meeting_counter += 1;
                vec![Event::MeetingCounterIncremented {
                    total: self.meeting_counter,
                }]
            }
            Command::ReplaceSessions { sessions } => {
                let count = sessions.len();
                self.sessions = sessions;
                vec![Event::SessionsReplaced { count }]
            }
            Command::ReplaceMeetings { meetings } => {
                let count = meetings.len();
                self.external_meetings = meetings;
                vec![Event::MeetingsReplaced { count }]
            }
            Command::SetConnection { state } => {
                if self.connection == state {
                    Vec::new()
                } else {
                    self.connection = state;
                    vec![Event::ConnectionChanged { state }]
                }
            }
        };

        debug!(
            event = "core.state.dispatch_completed",
            event_count = events.len()
        );
        Ok(events)
    }
}

/// Convenience for building log entries at the current time.
pub fn log_entry_now(evt: &crate::protocol::AgentEvent) -> EventLogEntry {
    EventLogEntry::from_agent_event(evt, chrono::Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outreach::CallOutcome;
    use crate::protocol::AgentEvent;

    fn store() -> DashboardStore {
        DashboardStore::new(100)
    }

    fn acme() -> Business {
        Business::new("p1", "Acme")
    }

    fn session(name: &str, email_sent: bool) -> SdrSession {
        SdrSession {
            id: name.to_lowercase(),
            business_name: Some(name.to_string()),
            email_sent,
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_is_idempotent_and_first_write_wins() {
        let mut store = store();

        let events = store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![acme()],
            })
            .unwrap();
        assert_eq!(
            events,
            vec![Event::BusinessAdded {
                place_id: "p1".to_string()
            }]
        );

        let mut renamed = acme();
        renamed.business_name = Some("Acme Renamed".to_string());
        let events = store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![renamed],
            })
            .unwrap();
        assert!(events.is_empty());

        assert_eq!(store.businesses().len(), 1);
        assert_eq!(store.businesses()[0].display_name(), "Acme");
    }

    #[test]
    fn test_disjoint_inserts_grow_total_leads() {
        let mut store = store();
        let before = store.stats().total_leads;

        let batch: Vec<Business> = (0..5)
            .map(|i| Business::new(format!("p{i}"), format!("Biz {i}")))
            .collect();
        store
            .dispatch(Command::UpsertBusinesses { businesses: batch })
            .unwrap();

        assert_eq!(store.stats().total_leads, before + 5);
    }

    #[test]
    fn test_upsert_with_duplicates_inside_batch() {
        let mut store = store();
        let events = store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![acme(), Business::new("p2", "Beta"), acme()],
            })
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(store.businesses().len(), 2);
    }

    #[test]
    fn test_lead_without_place_id_is_skipped_rest_of_batch_applies() {
        let mut store = store();
        let nameless = Business::new("", "No Id");

        let events = store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![acme(), nameless, Business::new("p2", "Beta")],
            })
            .unwrap();
        assert_eq!(events.len(), 2);
        let ids: Vec<&str> = store.businesses().iter().map(|b| b.place_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_replace_skips_leads_without_place_id() {
        let mut store = store();
        let events = store
            .dispatch(Command::ReplaceBusinesses {
                businesses: vec![Business::new("", "No Id"), acme()],
            })
            .unwrap();
        assert_eq!(events, vec![Event::BusinessesReplaced { count: 1 }]);
        assert_eq!(store.businesses()[0].place_id, "p1");

        // An empty id never enters the index
        let events = store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![Business::new("", "Still No Id")],
            })
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_replace_businesses_dedupes_first_occurrence() {
        let mut store = store();
        store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![Business::new("old", "Old Co")],
            })
            .unwrap();

        let mut second = acme();
        second.business_name = Some("Acme Again".to_string());
        let events = store
            .dispatch(Command::ReplaceBusinesses {
                businesses: vec![acme(), Business::new("p2", "Beta"), second],
            })
            .unwrap();

        assert_eq!(events, vec![Event::BusinessesReplaced { count: 2 }]);
        let names: Vec<&str> = store.businesses().iter().map(|b| b.display_name()).collect();
        assert_eq!(names, vec!["Acme", "Beta"]);

        // The index follows the replacement
        let events = store
            .dispatch(Command::UpsertBusinesses {
                businesses: vec![Business::new("old", "Old Co")],
            })
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_session_snapshot_is_replaced_not_merged() {
        let mut store = store();
        store
            .dispatch(Command::ReplaceSessions {
                sessions: vec![session("Acme", true), session("Beta", false)],
            })
            .unwrap();
        assert_eq!(store.sessions().len(), 2);

        let events = store
            .dispatch(Command::ReplaceSessions {
                sessions: vec![session("Gamma", false)],
            })
            .unwrap();
        assert_eq!(events, vec![Event::SessionsReplaced { count: 1 }]);
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.sessions()[0].display_name(), "Gamma");
    }

    #[test]
    fn test_meetings_combine_external_and_derived() {
        let mut store = store();
        store
            .dispatch(Command::ReplaceMeetings {
                meetings: vec![Meeting {
                    title: Some("Board review".to_string()),
                    ..Default::default()
                }],
            })
            .unwrap();
        store
            .dispatch(Command::ReplaceSessions {
                sessions: vec![session("Acme", true)],
            })
            .unwrap();

        let meetings = store.meetings();
        assert_eq!(meetings.len(), 2);
        assert_eq!(meetings[1].display_title(), "Follow-up: Acme");
        assert_eq!(store.external_meetings().len(), 1);
    }

    #[test]
    fn test_meeting_counter_is_kept_out_of_stats() {
        let mut store = store();
        let mut interested = session("Acme", true);
        interested.call_outcome = Some(CallOutcome::Interested);
        store
            .dispatch(Command::ReplaceSessions {
                sessions: vec![interested],
            })
            .unwrap();
        assert_eq!(store.stats().meetings, 2);

        let events = store.dispatch(Command::IncrementMeetingCounter).unwrap();
        assert_eq!(events, vec![Event::MeetingCounterIncremented { total: 1 }]);
        assert_eq!(store.meeting_counter(), 1);
        assert_eq!(store.stats().meetings, 2);
    }

    #[test]
    fn test_connection_change_only_reports_transitions() {
        let mut store = store();
        let events = store
            .dispatch(Command::SetConnection {
                state: ConnectionState::Disconnected,
            })
            .unwrap();
        assert!(events.is_empty());

        let events = store
            .dispatch(Command::SetConnection {
                state: ConnectionState::Connected,
            })
            .unwrap();
        assert_eq!(
            events,
            vec![Event::ConnectionChanged {
                state: ConnectionState::Connected
            }]
        );
        assert_eq!(store.connection(), ConnectionState::Connected);
    }

    #[test]
    fn test_log_event_and_snapshot() {
        let mut store = store();
        let entry = log_entry_now(&AgentEvent::new("call_started"));
        store
            .dispatch(Command::LogEvent {
                entry: entry.clone(),
            })
            .unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.events, vec![entry]);
        assert_eq!(snapshot.stats, store.stats());
    }
}
