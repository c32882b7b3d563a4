//! Meetings derived from SDR outreach.
//!
//! Derived meetings are computed from the current session snapshot on every
//! read and never stored.

use crate::meetings::types::{Meeting, MeetingSource};
use crate::outreach::SdrSession;

pub const SDR_ORGANIZER: &str = "RapidReach Team";

/// One follow-up meeting per session whose outreach sent an email.
pub fn derive_meetings(sessions: &[SdrSession]) -> Vec<Meeting> {
    sessions
        .iter()
        .filter(|s| s.email_sent)
        .map(|s| Meeting {
            title: Some(format!("Follow-up: {}", s.display_name())),
            organizer: Some(SDR_ORGANIZER.to_string()),
            start_time: s.created_at.clone(),
            source: MeetingSource::SdrOutreach,
            business_name: s.business_name.clone(),
            call_outcome: s.call_outcome.clone(),
            ..Default::default()
        })
        .collect()
}

/// External meetings followed by the derived ones.
pub fn combine(external: &[Meeting], sessions: &[SdrSession]) -> Vec<Meeting> {
    let mut all = external.to_vec();
    all.extend(derive_meetings(sessions));
    all
}
