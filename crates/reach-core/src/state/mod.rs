//! Client-side state: the single-writer store and its change events.

pub mod dispatch;
pub mod event_log;
pub mod events;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod types;

pub use dispatch::DashboardStore;
pub use event_log::{EventLog, EventLogEntry};
pub use events::Event;
pub use snapshot::DashboardSnapshot;
pub use stats::Stats;
pub use store::Store;
pub use types::Command;
