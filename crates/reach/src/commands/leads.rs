use clap::ArgMatches;
use tracing::{error, info};

use reach_core::events;

use super::helpers::{load_config, runtime, wait_for_leads, warn_leads_missing};
use crate::render::lead_row;
use crate::table::TableFormatter;

const COLUMNS: [(&str, usize); 6] = [
    ("Name", 30),
    ("Address", 36),
    ("Phone", 16),
    ("Rating", 6),
    ("Status", 12),
    ("Place ID", 28),
];

pub(crate) fn handle_leads_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config(matches)?;

    info!(event = "cli.leads_started", json_output = json_output);

    let (leads, loaded) = match runtime()?.block_on(wait_for_leads(&config)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Failed to load leads: {}", e);
            error!(event = "cli.leads_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if !loaded {
        warn_leads_missing(&config);
    }

    info!(event = "cli.leads_completed", count = leads.len(), loaded = loaded);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&leads)?);
    } else if leads.is_empty() {
        println!("No leads yet.");
    } else {
        let rows: Vec<Vec<String>> = leads.iter().map(lead_row).collect();
        let formatter = TableFormatter::new(&COLUMNS, &rows);
        println!("Leads:");
        formatter.print_table(&rows);
    }

    Ok(())
}
