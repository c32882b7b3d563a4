use tracing::{info, warn};

use crate::actions::errors::ActionError;
use crate::actions::gates::ActionGates;
use crate::actions::types::Action;
use crate::api::{
    ApiClient, ApiError, EmailProcessingRequest, HumanInputReply, LeadSearchRequest, SdrRequest,
};
use crate::config::{EmailConfig, LeadsConfig, ReachConfig, SdrConfig};
use crate::leads::Business;

/// What happened to a submission that was not refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Sent,
    /// Nothing worth sending, e.g. a blank human-input answer.
    Skipped,
}

/// Who the SDR workflow should reach out to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdrTarget {
    pub business_name: String,
    pub place_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    /// Overrides `sdr.skip_call` from config.
    pub skip_call: Option<bool>,
    /// Overrides `sdr.deck_template` from config.
    pub deck_template: Option<String>,
}

impl SdrTarget {
    pub fn from_business(business: &Business) -> Self {
        Self {
            business_name: business.display_name().to_string(),
            place_id: business.place_id.clone(),
            phone: business.phone.clone().unwrap_or_default(),
            email: business.email.clone().unwrap_or_default(),
            address: business.address.clone().unwrap_or_default(),
            city: business.city.clone().unwrap_or_default(),
            skip_call: None,
            deck_template: None,
        }
    }
}

/// Turns user intents into backend requests, one in flight per action.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    api: ApiClient,
    gates: ActionGates,
    leads: LeadsConfig,
    sdr: SdrConfig,
    email: EmailConfig,
}

impl ActionDispatcher {
    pub fn new(api: ApiClient, config: &ReachConfig) -> Self {
        Self {
            api,
            gates: ActionGates::new(),
            leads: config.leads.clone(),
            sdr: config.sdr.clone(),
            email: config.email.clone(),
        }
    }

    pub fn gates(&self) -> &ActionGates {
        &self.gates
    }

    /// Start a lead search in `city`.
    ///
    /// A blank city is refused before anything is sent. `max_results` of
    /// `None` or zero uses the configured default.
    pub async fn find_leads(
        &self,
        city: &str,
        max_results: Option<u32>,
    ) -> Result<Submission, ActionError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ActionError::InvalidInput {
                message: "Please enter a city name".to_string(),
            });
        }

        let _guard = self.gates.try_acquire(Action::FindLeads)?;
        let request = LeadSearchRequest {
            city: city.to_string(),
            max_results: max_results
                .filter(|n| *n > 0)
                .unwrap_or_else(|| self.leads.max_results()),
            business_types: self.leads.business_types(),
            exclude_chains: self.leads.exclude_chains(),
            min_rating: self.leads.min_rating(),
        };

        info!(
            event = "core.actions.find_leads_started",
            city = %request.city,
            max_results = request.max_results
        );
        self.api
            .start_lead_finding(&request)
            .await
            .map_err(|e| notice(e, "Error: ", "Failed to start lead finding: "))?;
        info!(event = "core.actions.find_leads_completed");
        Ok(Submission::Sent)
    }

    pub async fn start_sdr(&self, target: SdrTarget) -> Result<Submission, ActionError> {
        let _guard = self.gates.try_acquire(Action::StartSdr)?;
        let request = SdrRequest {
            business_name: target.business_name,
            phone: target.phone.trim().to_string(),
            email: target.email,
            address: target.address,
            city: target.city,
            place_id: target.place_id,
            skip_call: target.skip_call.unwrap_or_else(|| self.sdr.skip_call()),
            deck_template: target
                .deck_template
                .unwrap_or_else(|| self.sdr.deck_template().to_string()),
        };

        info!(
            event = "core.actions.sdr_started",
            place_id = %request.place_id,
            skip_call = request.skip_call
        );
        self.api
            .start_sdr(&request)
            .await
            .map_err(|e| notice(e, "SDR Error: ", "Failed to start SDR: "))?;
        info!(event = "core.actions.sdr_completed");
        Ok(Submission::Sent)
    }

    pub async fn process_emails(&self, max_emails: Option<u32>) -> Result<Submission, ActionError> {
        let _guard = self.gates.try_acquire(Action::ProcessEmails)?;
        let request = EmailProcessingRequest {
            max_emails: max_emails.unwrap_or_else(|| self.email.max_emails()),
        };

        info!(
            event = "core.actions.process_emails_started",
            max_emails = request.max_emails
        );
        self.api
            .start_email_processing(&request)
            .await
            .map_err(|e| notice(e, "Error: ", "Failed to process emails: "))?;
        info!(event = "core.actions.process_emails_completed");
        Ok(Submission::Sent)
    }

    /// Answer a human-input prompt. A blank answer is not sent.
    pub async fn respond(
        &self,
        request_id: &str,
        response: &str,
    ) -> Result<Submission, ActionError> {
        let response = response.trim();
        if response.is_empty() {
            info!(event = "core.actions.human_input_skipped", request_id = %request_id);
            return Ok(Submission::Skipped);
        }

        let _guard = self.gates.try_acquire(Action::HumanInput)?;
        let reply = HumanInputReply {
            request_id: request_id.to_string(),
            response: response.to_string(),
        };
        self.api
            .respond_human_input(&reply)
            .await
            .map_err(|e| notice(e, "Error: ", "Failed to send human input: "))?;
        Ok(Submission::Sent)
    }
}

fn notice(err: ApiError, rejected_prefix: &str, failed_prefix: &str) -> ActionError {
    warn!(event = "core.actions.request_failed", error = %err);
    match err {
        ApiError::Rejected { message } => ActionError::Rejected {
            notice: format!("{rejected_prefix}{message}"),
        },
        other => ActionError::Failed {
            notice: format!("{failed_prefix}{other}"),
        },
    }
}
