use serde::{Deserialize, Serialize};

/// Body of `POST /start_lead_finding`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSearchRequest {
    pub city: String,
    pub max_results: u32,
    pub business_types: Vec<String>,
    pub exclude_chains: bool,
    pub min_rating: f64,
}

/// Body of `POST /start_sdr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SdrRequest {
    pub business_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub place_id: String,
    pub skip_call: bool,
    pub deck_template: String,
}

/// Body of `POST /start_email_processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailProcessingRequest {
    pub max_emails: u32,
}

/// Body of `POST /api/human-input/respond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HumanInputReply {
    pub request_id: String,
    pub response: String,
}

/// Reply to the workflow-starting endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}
