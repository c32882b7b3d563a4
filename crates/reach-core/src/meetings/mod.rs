pub mod projection;
pub mod types;

pub use projection::{combine, derive_meetings};
pub use types::{Meeting, MeetingSource};
