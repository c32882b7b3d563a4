use crate::errors::ReachError;

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Malformed message: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed '{event}' payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReachError for RouteError {
    fn error_code(&self) -> &'static str {
        match self {
            RouteError::Decode { .. } => "ROUTE_DECODE_FAILED",
            RouteError::Payload { .. } => "ROUTE_PAYLOAD_INVALID",
        }
    }
}
