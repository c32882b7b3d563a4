//! Classifies live-channel messages by `type` and turns them into store
//! commands, notifications and runtime effects.

pub mod errors;
pub mod handler;
pub mod types;

pub use errors::RouteError;
pub use handler::{route, route_at};
pub use types::{Effect, Routed};
