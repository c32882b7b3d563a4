use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Result of the SDR phone call.
///
/// Unrecognized values are kept verbatim in [`CallOutcome::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallOutcome {
    Interested,
    AgreedToEmail,
    NotInterested,
    NoAnswer,
    Other(String),
}

impl CallOutcome {
    /// Outcomes that count toward the meetings stat.
    pub fn is_positive(&self) -> bool {
        matches!(self, CallOutcome::Interested | CallOutcome::AgreedToEmail)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CallOutcome::Interested => "interested",
            CallOutcome::AgreedToEmail => "agreed_to_email",
            CallOutcome::NotInterested => "not_interested",
            CallOutcome::NoAnswer => "no_answer",
            CallOutcome::Other(raw) => raw,
        }
    }
}

impl From<String> for CallOutcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "interested" => CallOutcome::Interested,
            "agreed_to_email" => CallOutcome::AgreedToEmail,
            "not_interested" => CallOutcome::NotInterested,
            "no_answer" => CallOutcome::NoAnswer,
            _ => CallOutcome::Other(value),
        }
    }
}

impl From<CallOutcome> for String {
    fn from(value: CallOutcome) -> Self {
        match value {
            CallOutcome::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().replace('_', " "))
    }
}

/// One SDR outreach workflow run, as reported by `GET /api/sdr_sessions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SdrSession {
    /// Key of the session in the response object.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default)]
    pub call_outcome: Option<CallOutcome>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub email_sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SdrSession {
    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or("Unknown")
    }

    pub fn has_positive_outcome(&self) -> bool {
        self.call_outcome
            .as_ref()
            .is_some_and(CallOutcome::is_positive)
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
