//! Core library for the RapidReach dashboard client.
//!
//! Keeps a consistent in-memory view of the backend (leads, SDR outreach,
//! meetings, agent activity) fed by a reconnecting live-update channel and
//! HTTP polls, and sends user actions to the backend.

pub mod actions;
pub mod api;
pub mod config;
pub mod connection;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod leads;
pub mod logging;
pub mod meetings;
pub mod outreach;
pub mod protocol;
pub mod router;
pub mod state;

pub use actions::{Action, ActionDispatcher, ActionError, ControlState, SdrTarget, Submission};
pub use api::{ApiClient, ApiError};
pub use config::ReachConfig;
pub use connection::{ConnectionState, ConnectionManager, Transport, WsTransport};
pub use dashboard::{DashboardHandle, DashboardInput, launch};
pub use leads::Business;
pub use meetings::{Meeting, MeetingSource};
pub use outreach::{CallOutcome, SdrSession};
pub use state::{DashboardSnapshot, DashboardStore, Event, Stats};

pub use logging::init_logging;
