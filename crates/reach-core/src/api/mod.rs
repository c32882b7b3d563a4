//! HTTP client for the backend's workflow and polling endpoints.

pub mod client;
pub mod errors;
pub mod types;

pub use client::ApiClient;
pub use errors::ApiError;
pub use types::{
    ActionResponse, EmailProcessingRequest, HumanInputReply, LeadSearchRequest, SdrRequest,
};
