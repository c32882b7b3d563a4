use serde::Serialize;

use crate::leads::Business;
use crate::meetings::{Meeting, derive_meetings};
use crate::outreach::SdrSession;

/// Dashboard headline numbers. Always derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_leads: usize,
    pub contacted: usize,
    pub meetings: usize,
    pub emails_sent: usize,
}

impl Stats {
    /// `meetings` sums positive call outcomes and the meeting list (external
    /// plus derived). A session that was interested and got an email counts
    /// twice.
    pub fn derive(
        businesses: &[Business],
        sessions: &[SdrSession],
        external_meetings: &[Meeting],
    ) -> Self {
        let contacted_leads = businesses.iter().filter(|b| b.is_contacted()).count();
        let positive = sessions.iter().filter(|s| s.has_positive_outcome()).count();
        let listed = external_meetings.len() + derive_meetings(sessions).len();

        Self {
            total_leads: businesses.len(),
            contacted: contacted_leads.max(sessions.len()),
            meetings: positive + listed,
            emails_sent: sessions.iter().filter(|s| s.email_sent).count(),
        }
    }
}
