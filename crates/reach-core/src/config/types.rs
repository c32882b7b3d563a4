//! Configuration type definitions for the RapidReach client.
//!
//! Every tunable is optional in the file so that user and project configs can
//! be layered; accessors fill in the built-in defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! base_url = "http://localhost:8000"
//!
//! [connection]
//! heartbeat_interval_secs = 300
//! reconnect_delay_ms = 2000
//!
//! [leads]
//! max_results = 20
//! exclude_chains = true
//!
//! [sdr]
//! deck_template = "professional"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Main configuration loaded from TOML config files.
///
/// Loaded from (later overrides earlier):
/// 1. User config: `~/.rapidreach/config.toml`
/// 2. Project config: `./.rapidreach/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReachConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub leads: LeadsConfig,

    #[serde(default)]
    pub sdr: SdrConfig,

    #[serde(default)]
    pub email: EmailConfig,
}

/// Where the RapidReach backend lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServerConfig {
    /// HTTP base URL of the backend. Default: `http://localhost:8000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Path of the live-update WebSocket endpoint. Default: `/ws`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_path: Option<String>,
}

impl ServerConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(defaults::DEFAULT_BASE_URL)
    }

    pub fn ws_path(&self) -> &str {
        self.ws_path.as_deref().unwrap_or(defaults::DEFAULT_WS_PATH)
    }

    /// WebSocket URL for the live-update channel.
    ///
    /// `https` maps to `wss`, anything else to `ws`.
    pub fn ws_url(&self) -> String {
        let base = self.base_url().trim_end_matches('/');
        let (scheme, rest) = match base.split_once("://") {
            Some(("https", rest)) => ("wss", rest),
            Some((_, rest)) => ("ws", rest),
            None => ("ws", base),
        };
        let path = self.ws_path();
        if path.starts_with('/') {
            format!("{scheme}://{rest}{path}")
        } else {
            format!("{scheme}://{rest}/{path}")
        }
    }
}

/// Live-update channel timing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConnectionConfig {
    /// Interval between outbound liveness pings. Default: 300 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_interval_secs: Option<u64>,

    /// Constant delay before each reconnect attempt. Default: 2000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_delay_ms: Option<u64>,

    /// How long to wait for a close after a transport error before forcing
    /// one. Default: 5000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_close_grace_ms: Option<u64>,
}

impl ConnectionConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(
            self.heartbeat_interval_secs
                .unwrap_or(defaults::DEFAULT_HEARTBEAT_INTERVAL_SECS),
        )
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(
            self.reconnect_delay_ms
                .unwrap_or(defaults::DEFAULT_RECONNECT_DELAY_MS),
        )
    }

    pub fn error_close_grace(&self) -> Duration {
        Duration::from_millis(
            self.error_close_grace_ms
                .unwrap_or(defaults::DEFAULT_ERROR_CLOSE_GRACE_MS),
        )
    }
}

/// In-memory dashboard limits.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DashboardConfig {
    /// Number of event log entries kept, newest first. Default: 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log_capacity: Option<usize>,
}

impl DashboardConfig {
    pub fn event_log_capacity(&self) -> usize {
        self.event_log_capacity
            .unwrap_or(defaults::DEFAULT_EVENT_LOG_CAPACITY)
    }
}

/// Defaults for `POST /start_lead_finding`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LeadsConfig {
    /// Default: 20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Business categories to search. Empty lets the backend pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_types: Option<Vec<String>>,

    /// Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_chains: Option<bool>,

    /// Default: 0.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl LeadsConfig {
    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(defaults::DEFAULT_MAX_RESULTS)
    }

    pub fn business_types(&self) -> Vec<String> {
        self.business_types.clone().unwrap_or_default()
    }

    pub fn exclude_chains(&self) -> bool {
        self.exclude_chains.unwrap_or(true)
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating.unwrap_or(0.0)
    }
}

/// Defaults for `POST /start_sdr`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SdrConfig {
    /// Skip the phone call and go straight to email. Default: false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_call: Option<bool>,

    /// Pitch deck template name. Default: "professional".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_template: Option<String>,
}

impl SdrConfig {
    pub fn skip_call(&self) -> bool {
        self.skip_call.unwrap_or(false)
    }

    pub fn deck_template(&self) -> &str {
        self.deck_template
            .as_deref()
            .unwrap_or(defaults::DEFAULT_DECK_TEMPLATE)
    }
}

/// Defaults for `POST /start_email_processing`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EmailConfig {
    /// Default: 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_emails: Option<u32>,
}

impl EmailConfig {
    pub fn max_emails(&self) -> u32 {
        self.max_emails.unwrap_or(defaults::DEFAULT_MAX_EMAILS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_config_serialization_roundtrip() {
        let mut config = ReachConfig::default();
        config.server.base_url = Some("https://reach.example.com".to_string());
        config.connection.reconnect_delay_ms = Some(500);

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ReachConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ReachConfig::default();
        assert_eq!(config.server.base_url(), "http://localhost:8000");
        assert_eq!(config.connection.heartbeat_interval(), Duration::from_secs(300));
        assert_eq!(config.connection.reconnect_delay(), Duration::from_millis(2000));
        assert_eq!(config.dashboard.event_log_capacity(), 100);
        assert_eq!(config.leads.max_results(), 20);
        assert!(config.leads.exclude_chains());
        assert_eq!(config.sdr.deck_template(), "professional");
        assert_eq!(config.email.max_emails(), 10);
    }

    #[test]
    fn test_ws_url_from_http_base() {
        let server = ServerConfig {
            base_url: Some("http://localhost:8000/".to_string()),
            ws_path: None,
        };
        assert_eq!(server.ws_url(), "ws://localhost:8000/ws");
    }

    #[test]
    fn test_ws_url_from_https_base_uses_wss() {
        let server = ServerConfig {
            base_url: Some("https://reach.example.com".to_string()),
            ws_path: Some("live".to_string()),
        };
        assert_eq!(server.ws_url(), "wss://reach.example.com/live");
    }

    #[test]
    fn test_partial_section_deserialize() {
        let toml_str = r#"
[sdr]
skip_call = true
"#;
        let config: ReachConfig = toml::from_str(toml_str).unwrap();
        assert!(config.sdr.skip_call());
        assert_eq!(config.sdr.deck_template(), "professional");
        assert_eq!(config.server.base_url, None);
    }
}
