use crate::actions::types::Action;
use crate::errors::ReachError;

/// Why a user action did not start.
///
/// `Rejected` and `Failed` display as the notice to show the user.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("{action} is already in progress")]
    Busy { action: Action },

    #[error("{message}")]
    InvalidInput { message: String },

    /// The backend answered with `status: "error"`.
    #[error("{notice}")]
    Rejected { notice: String },

    /// The request never got a usable answer.
    #[error("{notice}")]
    Failed { notice: String },
}

impl ReachError for ActionError {
    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Busy { .. } => "ACTION_BUSY",
            ActionError::InvalidInput { .. } => "ACTION_INVALID_INPUT",
            ActionError::Rejected { .. } => "ACTION_REJECTED",
            ActionError::Failed { .. } => "ACTION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ActionError::Busy { .. } | ActionError::InvalidInput { .. }
        )
    }
}
