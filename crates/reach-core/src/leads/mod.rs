pub mod types;

pub use types::Business;
