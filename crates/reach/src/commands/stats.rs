use clap::ArgMatches;
use tracing::{error, info, warn};

use reach_core::{ApiClient, ApiError, ReachConfig, Stats, events};

use super::helpers::{api_client, load_config, runtime, wait_for_leads, warn_leads_missing};

pub(crate) fn handle_stats_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config(matches)?;
    let api = api_client(&config)?;

    info!(event = "cli.stats_started", json_output = json_output);

    let (stats, leads_loaded) = match runtime()?.block_on(collect_stats(&config, &api)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Failed to collect stats: {}", e);
            error!(event = "cli.stats_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if !leads_loaded {
        warn_leads_missing(&config);
    }

    info!(
        event = "cli.stats_completed",
        total_leads = stats.total_leads,
        meetings = stats.meetings
    );

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }

    Ok(())
}

/// Lead counts come from the live channel, sessions and meetings from HTTP.
async fn collect_stats(config: &ReachConfig, api: &ApiClient) -> Result<(Stats, bool), ApiError> {
    let (businesses, leads_loaded) = wait_for_leads(config).await?;

    let sessions = api.fetch_sdr_sessions().await?.unwrap_or_default();
    let meetings = match api.fetch_meetings().await {
        Ok(meetings) => meetings,
        Err(e) => {
            warn!(event = "cli.stats_meetings_failed", error = %e);
            Vec::new()
        }
    };

    Ok((
        Stats::derive(&businesses, &sessions, &meetings),
        leads_loaded,
    ))
}

fn print_stats(stats: &Stats) {
    println!("Leads:        {}", stats.total_leads);
    println!("Contacted:    {}", stats.contacted);
    println!("Meetings:     {}", stats.meetings);
    println!("Emails sent:  {}", stats.emails_sent);
}
