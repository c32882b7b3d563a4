use std::time::Duration;

use clap::ArgMatches;
use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, warn};

use reach_core::errors::ReachError;
use reach_core::{
    ActionDispatcher, ActionError, ApiClient, ApiError, Business, Event, ReachConfig, events,
    launch,
};

/// How long to wait for the live channel's initial lead list.
pub const INIT_WAIT: Duration = Duration::from_secs(3);

/// Load config, apply `--server`, and validate the result.
///
/// A broken config file falls back to defaults with a warning; an invalid
/// `--server` is an error.
pub fn load_config(matches: &ArgMatches) -> Result<ReachConfig, Box<dyn std::error::Error>> {
    let config = match ReachConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.rapidreach/config.toml and ./.rapidreach/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            ReachConfig::default()
        }
    };

    let config = config.with_server(matches.get_one::<String>("server").cloned());
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        error!(event = "cli.config.invalid", error = %e, code = e.error_code());
        events::log_app_error(&e);
        return Err(e.into());
    }

    events::log_app_startup(config.server.base_url());
    Ok(config)
}

/// Leads only arrive over the live channel. Connect long enough to get the
/// initial snapshot and return it, plus whether a lead list actually arrived.
pub async fn wait_for_leads(config: &ReachConfig) -> Result<(Vec<Business>, bool), ApiError> {
    let handle = launch(config)?;
    let mut updates = handle.channels().subscribe();

    let saw_init = tokio::time::timeout(INIT_WAIT, async {
        loop {
            match updates.recv().await {
                Ok(Event::BusinessesReplaced { .. }) => return true,
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return false,
            }
        }
    })
    .await
    .unwrap_or(false);

    // The init frame may have landed before we subscribed
    let businesses = handle.channels().current().businesses;
    handle.shutdown().await;

    let loaded = saw_init || !businesses.is_empty();
    debug!(event = "cli.leads_wait_completed", loaded = loaded, count = businesses.len());
    Ok((businesses, loaded))
}

/// Warn on stderr when [`wait_for_leads`] came back without a lead list.
pub fn warn_leads_missing(config: &ReachConfig) {
    eprintln!(
        "Warning: No lead list from {} within {}s. Lead counts may be incomplete.",
        config.server.ws_url(),
        INIT_WAIT.as_secs()
    );
}

pub fn runtime() -> Result<Runtime, Box<dyn std::error::Error>> {
    Ok(Runtime::new()?)
}

pub fn api_client(config: &ReachConfig) -> Result<ApiClient, Box<dyn std::error::Error>> {
    match ApiClient::new(config.server.base_url()) {
        Ok(api) => Ok(api),
        Err(e) => {
            eprintln!("❌ Failed to set up HTTP client: {}", e);
            error!(event = "cli.api_client_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn dispatcher(config: &ReachConfig) -> Result<ActionDispatcher, Box<dyn std::error::Error>> {
    Ok(ActionDispatcher::new(api_client(config)?, config))
}

/// Print an action failure. The error text is already the user notice.
pub fn report_action_error(command: &str, e: &ActionError) {
    eprintln!("❌ {}", e);
    error!(
        event = "cli.action_failed",
        command = command,
        error = %e,
        code = e.error_code(),
        user_error = e.is_user_error()
    );
    events::log_app_error(e);
}
