use crate::errors::ReachError;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Failed to connect to '{url}': {message}")]
    ConnectFailed { url: String, message: String },

    #[error("Live channel transport error: {message}")]
    Transport { message: String },
}

impl ReachError for ConnectionError {
    fn error_code(&self) -> &'static str {
        match self {
            ConnectionError::ConnectFailed { .. } => "CONNECTION_FAILED",
            ConnectionError::Transport { .. } => "CONNECTION_TRANSPORT_ERROR",
        }
    }
}
