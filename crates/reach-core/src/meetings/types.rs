use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::outreach::CallOutcome;

/// Where a meeting entry came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingSource {
    /// Synthesized from an SDR session that sent an email.
    SdrOutreach,
    /// Returned by `GET /api/meetings`.
    #[default]
    #[serde(other)]
    External,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Meeting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Value>,
    #[serde(default)]
    pub source: MeetingSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_outcome: Option<CallOutcome>,
}

impl Meeting {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Meeting")
    }
}
