use clap::ArgMatches;
use tracing::info;

use super::helpers::{dispatcher, load_config, report_action_error, runtime};

pub(crate) fn handle_find_leads_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let city = matches
        .get_one::<String>("city")
        .ok_or("City argument is required")?;
    let max_results = matches.get_one::<u32>("max-results").copied();

    let config = load_config(matches)?;
    let dispatcher = dispatcher(&config)?;

    info!(event = "cli.find_leads_started", city = %city, max_results = ?max_results);

    match runtime()?.block_on(dispatcher.find_leads(city, max_results)) {
        Ok(_) => {
            println!("🔍 Lead search started for {}", city.trim());
            println!("   Run `reach watch` to follow progress.");
            info!(event = "cli.find_leads_completed");
            Ok(())
        }
        Err(e) => {
            report_action_error("find-leads", &e);
            Err(e.into())
        }
    }
}
