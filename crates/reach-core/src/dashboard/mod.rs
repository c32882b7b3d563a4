//! # Dashboard runtime
//!
//! Glues the live channel, the router and the store together. A single task
//! owns the store; everything else talks to it through channels:
//!
//! - snapshots are published on a `watch` channel after every change
//! - change events go out on a `broadcast` channel
//! - poll requests and results come in on an `mpsc` queue

pub mod handle;
pub mod runtime;
pub mod types;

pub use handle::{DashboardHandle, launch};
pub use runtime::Dashboard;
pub use types::{DashboardChannels, DashboardInput};
