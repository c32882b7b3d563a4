use clap::ArgMatches;
use tracing::info;

use reach_core::SdrTarget;

use super::helpers::{dispatcher, load_config, report_action_error, runtime};

pub(crate) fn handle_sdr_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let text = |name: &str| matches.get_one::<String>(name).cloned().unwrap_or_default();

    let target = SdrTarget {
        business_name: text("business-name"),
        place_id: text("place-id"),
        phone: text("phone"),
        email: text("email"),
        address: text("address"),
        city: text("city"),
        // Absent flag defers to config
        skip_call: matches.get_flag("skip-call").then_some(true),
        deck_template: matches.get_one::<String>("deck-template").cloned(),
    };

    let config = load_config(matches)?;
    let dispatcher = dispatcher(&config)?;
    let business_name = target.business_name.clone();

    info!(
        event = "cli.sdr_started",
        business_name = %business_name,
        place_id = %target.place_id
    );

    match runtime()?.block_on(dispatcher.start_sdr(target)) {
        Ok(_) => {
            println!("📞 SDR outreach started for {}", business_name);
            println!("   Run `reach watch` to follow progress.");
            info!(event = "cli.sdr_completed");
            Ok(())
        }
        Err(e) => {
            report_action_error("sdr", &e);
            Err(e.into())
        }
    }
}
