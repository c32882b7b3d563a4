//! # Configuration System
//!
//! Hierarchical TOML configuration for the RapidReach client.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.rapidreach/config.toml`
//! 3. **Project config** - `./.rapidreach/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use reach_core::config::ReachConfig;
//!
//! fn example() -> Result<(), reach_core::errors::ConfigError> {
//!     let config = ReachConfig::load_hierarchy()?;
//!     println!("live channel: {}", config.server.ws_url());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{
    ConnectionConfig, DashboardConfig, EmailConfig, LeadsConfig, ReachConfig, SdrConfig,
    ServerConfig,
};
pub use validation::validate_config;

impl ReachConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }

    /// Apply a `--server` override from the command line.
    pub fn with_server(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.server.base_url = Some(url);
        }
        self
    }
}
