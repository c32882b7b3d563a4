//! User-triggered actions and their busy gates.
//!
//! Each action is one request/response exchange. While it is in flight its
//! gate is closed and a second submission is refused. The gate reopens when
//! the action's own request finishes, whatever the outcome.

pub mod dispatcher;
pub mod errors;
pub mod gates;
pub mod types;

pub use dispatcher::{ActionDispatcher, SdrTarget, Submission};
pub use errors::ActionError;
pub use gates::{ActionGates, GateGuard};
pub use types::{Action, ControlState};
