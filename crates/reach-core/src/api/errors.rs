use crate::errors::ReachError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid server URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("{source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("{message}")]
    Rejected { message: String },
}

impl ApiError {
    /// Application-level refusal, as opposed to a network or decode failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

impl ReachError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl { .. } => "API_INVALID_URL",
            ApiError::Transport { .. } => "API_TRANSPORT_FAILED",
            ApiError::InvalidResponse { .. } => "API_INVALID_RESPONSE",
            ApiError::Rejected { .. } => "API_REJECTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ApiError::InvalidUrl { .. })
    }
}
