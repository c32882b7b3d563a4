use serde::{Deserialize, Serialize};

/// Which action a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    FindLeads,
    StartSdr,
    ProcessEmails,
    HumanInput,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::FindLeads,
        Action::StartSdr,
        Action::ProcessEmails,
        Action::HumanInput,
    ];

    pub fn idle_label(&self) -> &'static str {
        match self {
            Action::FindLeads => "🔍 Find Leads",
            Action::StartSdr => "Run SDR",
            Action::ProcessEmails => "📧 Process Inbox",
            Action::HumanInput => "Submit",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            Action::FindLeads => "Searching...",
            Action::StartSdr => "Starting SDR...",
            Action::ProcessEmails => "Processing...",
            Action::HumanInput => "Sending...",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::FindLeads => "find leads",
            Action::StartSdr => "start SDR",
            Action::ProcessEmails => "process emails",
            Action::HumanInput => "human input",
        };
        write!(f, "{name}")
    }
}

/// Whether a control can be used right now and what it should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub action: Action,
    pub enabled: bool,
    pub label: &'static str,
}

impl ControlState {
    pub fn idle(action: Action) -> Self {
        Self {
            action,
            enabled: true,
            label: action.idle_label(),
        }
    }

    pub fn busy(action: Action) -> Self {
        Self {
            action,
            enabled: false,
            label: action.busy_label(),
        }
    }
}
