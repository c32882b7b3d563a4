//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.rapidreach/config.toml` (global user preferences)
//! 3. **Project config** - `./.rapidreach/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority, applied by the CLI)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{
    ConnectionConfig, DashboardConfig, EmailConfig, LeadsConfig, ReachConfig, SdrConfig,
    ServerConfig,
};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".rapidreach";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors; unreadable or unparseable ones are.
pub fn load_hierarchy() -> Result<ReachConfig, ConfigError> {
    let user = user_config_path();
    let project = std::env::current_dir()?
        .join(CONFIG_DIR)
        .join(CONFIG_FILE);
    load_from_paths(user.as_deref(), Some(&project))
}

/// Load and merge the given config files, then validate the result.
pub fn load_from_paths(
    user: Option<&Path>,
    project: Option<&Path>,
) -> Result<ReachConfig, ConfigError> {
    let mut config = ReachConfig::default();

    for path in [user, project].into_iter().flatten() {
        match load_config_file(path) {
            Ok(layer) => config = merge_configs(config, layer),
            Err(e) if e.is_not_found() => {
                debug!(event = "core.config.file_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &Path) -> Result<ReachConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let config: ReachConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;
    debug!(event = "core.config.file_loaded", path = %path.display());
    Ok(config)
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Override values replace base values only where they are set.
pub fn merge_configs(base: ReachConfig, override_config: ReachConfig) -> ReachConfig {
    ReachConfig {
        server: ServerConfig {
            base_url: override_config.server.base_url.or(base.server.base_url),
            ws_path: override_config.server.ws_path.or(base.server.ws_path),
        },
        connection: ConnectionConfig {
            heartbeat_interval_secs: override_config
                .connection
                .heartbeat_interval_secs
                .or(base.connection.heartbeat_interval_secs),
            reconnect_delay_ms: override_config
                .connection
                .reconnect_delay_ms
                .or(base.connection.reconnect_delay_ms),
            error_close_grace_ms: override_config
                .connection
                .error_close_grace_ms
                .or(base.connection.error_close_grace_ms),
        },
        dashboard: DashboardConfig {
            event_log_capacity: override_config
                .dashboard
                .event_log_capacity
                .or(base.dashboard.event_log_capacity),
        },
        leads: LeadsConfig {
            max_results: override_config.leads.max_results.or(base.leads.max_results),
            business_types: override_config
                .leads
                .business_types
                .or(base.leads.business_types),
            exclude_chains: override_config
                .leads
                .exclude_chains
                .or(base.leads.exclude_chains),
            min_rating: override_config.leads.min_rating.or(base.leads.min_rating),
        },
        sdr: SdrConfig {
            skip_call: override_config.sdr.skip_call.or(base.sdr.skip_call),
            deck_template: override_config.sdr.deck_template.or(base.sdr.deck_template),
        },
        email: EmailConfig {
            max_emails: override_config.email.max_emails.or(base.email.max_emails),
        },
    }
}

/// Path of the user-level config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = load_from_paths(Some(&missing), Some(&missing)).unwrap();
        assert_eq!(config, ReachConfig::default());
    }

    #[test]
    fn test_project_config_overrides_user_config() {
        let dir = TempDir::new().unwrap();
        let user = write_config(
            &dir,
            "user.toml",
            r#"
[server]
base_url = "http://user-host:8000"

[connection]
reconnect_delay_ms = 1000
"#,
        );
        let project = write_config(
            &dir,
            "project.toml",
            r#"
[server]
base_url = "http://project-host:9000"
"#,
        );

        let config = load_from_paths(Some(&user), Some(&project)).unwrap();
        assert_eq!(config.server.base_url(), "http://project-host:9000");
        // Not set by the project layer, so the user value survives
        assert_eq!(config.connection.reconnect_delay_ms, Some(1000));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let broken = write_config(&dir, "broken.toml", "[server\nbase_url = ");

        let result = load_from_paths(Some(&broken), None);
        assert!(matches!(
            result,
            Err(ConfigError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        let bad = write_config(
            &dir,
            "bad.toml",
            r#"
[connection]
heartbeat_interval_secs = 0
"#,
        );

        let result = load_from_paths(Some(&bad), None);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_base_when_override_unset() {
        let mut base = ReachConfig::default();
        base.sdr.deck_template = Some("minimal".to_string());
        base.email.max_emails = Some(25);

        let mut over = ReachConfig::default();
        over.email.max_emails = Some(5);

        let merged = merge_configs(base, over);
        assert_eq!(merged.sdr.deck_template(), "minimal");
        assert_eq!(merged.email.max_emails(), 5);
    }
}
