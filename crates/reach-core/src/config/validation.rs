//! Configuration validation logic.

use crate::config::types::ReachConfig;
use crate::errors::ConfigError;

/// Validate a ReachConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `server.base_url` must be an absolute `http` or `https` URL
/// - heartbeat interval, reconnect delay, error-close grace and event log
///   capacity must be non-zero
/// - `leads.min_rating` must be within 0..=5
pub fn validate_config(config: &ReachConfig) -> Result<(), ConfigError> {
    let base_url = config.server.base_url();
    match reqwest::Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        Ok(url) => {
            return Err(ConfigError::InvalidServerUrl {
                url: base_url.to_string(),
                message: format!("unsupported scheme '{}', use http or https", url.scheme()),
            });
        }
        Err(e) => {
            return Err(ConfigError::InvalidServerUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            });
        }
    }

    if config.connection.heartbeat_interval_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "connection.heartbeat_interval_secs must be greater than 0".to_string(),
        });
    }

    if config.connection.reconnect_delay_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "connection.reconnect_delay_ms must be greater than 0".to_string(),
        });
    }

    if config.connection.error_close_grace_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "connection.error_close_grace_ms must be greater than 0".to_string(),
        });
    }

    if config.dashboard.event_log_capacity == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "dashboard.event_log_capacity must be greater than 0".to_string(),
        });
    }

    if let Some(rating) = config.leads.min_rating
        && !(0.0..=5.0).contains(&rating)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("leads.min_rating must be between 0 and 5, got {rating}"),
        });
    }

    Ok(())
}
