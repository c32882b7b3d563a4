use clap::ArgMatches;
use tracing::{error, info};

use reach_core::events;

use super::helpers::{api_client, load_config, runtime};
use crate::render::session_row;
use crate::table::TableFormatter;

const COLUMNS: [(&str, usize); 5] = [
    ("Business", 32),
    ("Call outcome", 16),
    ("Email", 5),
    ("Subject", 40),
    ("Created", 20),
];

pub(crate) fn handle_sessions_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config(matches)?;
    let api = api_client(&config)?;

    info!(event = "cli.sessions_started", json_output = json_output);

    let sessions = match runtime()?.block_on(api.fetch_sdr_sessions()) {
        Ok(sessions) => sessions.unwrap_or_default(),
        Err(e) => {
            eprintln!("❌ Failed to fetch SDR sessions: {}", e);
            error!(event = "cli.sessions_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    info!(event = "cli.sessions_completed", count = sessions.len());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    } else if sessions.is_empty() {
        println!("No SDR sessions yet.");
    } else {
        let rows: Vec<Vec<String>> = sessions.iter().map(session_row).collect();
        let formatter = TableFormatter::new(&COLUMNS, &rows);
        println!("SDR sessions:");
        formatter.print_table(&rows);
    }

    Ok(())
}
