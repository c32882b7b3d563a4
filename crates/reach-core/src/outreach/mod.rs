pub mod types;

pub use types::{CallOutcome, SdrSession};
