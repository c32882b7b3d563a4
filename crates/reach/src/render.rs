//! Plain-text rendering of dashboard state for the terminal.

use chrono::Local;

use reach_core::state::EventLogEntry;
use reach_core::{Business, ConnectionState, ControlState, Event, Meeting, MeetingSource, SdrSession, Stats};

pub const DEFAULT_HUMAN_INPUT_PROMPT: &str = "Agent needs your input:";

pub fn connection_line(state: ConnectionState) -> String {
    let marker = match state {
        ConnectionState::Connected => "●",
        ConnectionState::Connecting => "◌",
        ConnectionState::Disconnected => "○",
    };
    format!("{marker} {state}")
}

/// `[14:02:11] lead finder    Found 12 businesses`
pub fn log_line(entry: &EventLogEntry) -> String {
    let time = entry.timestamp.with_timezone(&Local).format("%H:%M:%S");
    let agent = entry.agent_type.replace('_', " ");
    format!("[{time}] {agent:<14} {}", entry.message)
}

pub fn stats_line(stats: &Stats) -> String {
    format!(
        "Leads: {} | Contacted: {} | Meetings: {} | Emails sent: {}",
        stats.total_leads, stats.contacted, stats.meetings, stats.emails_sent
    )
}

pub fn prompt_text(prompt: Option<&str>) -> &str {
    prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(DEFAULT_HUMAN_INPUT_PROMPT)
}

/// `⏳ Searching... | Sending...` for the controls in flight, if any.
pub fn busy_line(controls: &[ControlState]) -> Option<String> {
    let busy: Vec<&str> = controls
        .iter()
        .filter(|c| !c.enabled)
        .map(|c| c.label)
        .collect();
    (!busy.is_empty()).then(|| format!("⏳ {}", busy.join(" | ")))
}

/// Line to print for a dashboard event, if it is worth showing on its own.
///
/// Stats and prompts are printed separately by the watch loop.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::ConnectionChanged { state } => Some(connection_line(*state)),
        Event::EventLogged { entry } => Some(log_line(entry)),
        Event::BusinessesReplaced { count } => Some(format!("Loaded {count} leads")),
        Event::WorkflowFinished { event } => Some(format!("✓ Workflow finished: {event}")),
        Event::BusinessAdded { .. }
        | Event::MeetingCounterIncremented { .. }
        | Event::SessionsReplaced { .. }
        | Event::MeetingsReplaced { .. }
        | Event::HumanInputRequested { .. } => None,
    }
}

pub fn lead_row(business: &Business) -> Vec<String> {
    vec![
        business.display_name().to_string(),
        business.address.clone().unwrap_or_default(),
        business.phone.clone().unwrap_or_default(),
        business
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string()),
        business
            .lead_status
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "new".to_string()),
        business.place_id.clone(),
    ]
}

pub fn session_row(session: &SdrSession) -> Vec<String> {
    vec![
        session.display_name().to_string(),
        session
            .call_outcome
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string()),
        if session.email_sent { "Yes" } else { "No" }.to_string(),
        session.email_subject.clone().unwrap_or_default(),
        session.created_at.clone().unwrap_or_default(),
    ]
}

pub fn meeting_row(meeting: &Meeting) -> Vec<String> {
    let source = match meeting.source {
        MeetingSource::SdrOutreach => "sdr",
        MeetingSource::External => "calendar",
    };
    vec![
        meeting.display_title().to_string(),
        meeting.organizer.clone().unwrap_or_default(),
        meeting.start_time.clone().unwrap_or_else(|| "-".to_string()),
        source.to_string(),
        meeting
            .call_outcome
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    ]
}
