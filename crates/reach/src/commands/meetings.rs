use clap::ArgMatches;
use tracing::{error, info, warn};

use reach_core::events;
use reach_core::meetings::combine;

use super::helpers::{api_client, load_config, runtime};
use crate::render::meeting_row;
use crate::table::TableFormatter;

const COLUMNS: [(&str, usize); 5] = [
    ("Title", 40),
    ("Organizer", 20),
    ("Start", 25),
    ("Source", 8),
    ("Call outcome", 16),
];

pub(crate) fn handle_meetings_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config(matches)?;
    let api = api_client(&config)?;
    let runtime = runtime()?;

    info!(event = "cli.meetings_started", json_output = json_output);

    let sessions = match runtime.block_on(api.fetch_sdr_sessions()) {
        Ok(sessions) => sessions.unwrap_or_default(),
        Err(e) => {
            eprintln!("❌ Failed to fetch SDR sessions: {}", e);
            error!(event = "cli.meetings_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    // Calendar failures still leave the SDR follow-ups worth showing
    let external = match runtime.block_on(api.fetch_meetings()) {
        Ok(meetings) => meetings,
        Err(e) => {
            eprintln!("Warning: Could not fetch calendar meetings: {}", e);
            warn!(event = "cli.meetings_external_failed", error = %e);
            Vec::new()
        }
    };

    let meetings = combine(&external, &sessions);
    info!(event = "cli.meetings_completed", count = meetings.len());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&meetings)?);
    } else if meetings.is_empty() {
        println!("No meetings scheduled.");
    } else {
        let rows: Vec<Vec<String>> = meetings.iter().map(meeting_row).collect();
        let formatter = TableFormatter::new(&COLUMNS, &rows);
        println!("Meetings:");
        formatter.print_table(&rows);
    }

    Ok(())
}
