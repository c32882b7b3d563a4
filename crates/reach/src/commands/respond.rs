use clap::ArgMatches;
use tracing::info;

use reach_core::Submission;

use super::helpers::{dispatcher, load_config, report_action_error, runtime};

pub(crate) fn handle_respond_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let request_id = matches
        .get_one::<String>("request-id")
        .ok_or("Request ID argument is required")?;
    let response = matches
        .get_one::<String>("response")
        .ok_or("Response argument is required")?;

    let config = load_config(matches)?;
    let dispatcher = dispatcher(&config)?;

    info!(event = "cli.respond_started", request_id = %request_id);

    match runtime()?.block_on(dispatcher.respond(request_id, response)) {
        Ok(Submission::Sent) => {
            println!("✅ Response sent for request {}", request_id);
            info!(event = "cli.respond_completed", request_id = %request_id);
            Ok(())
        }
        Ok(Submission::Skipped) => {
            println!("Empty response, nothing sent.");
            info!(event = "cli.respond_skipped", request_id = %request_id);
            Ok(())
        }
        Err(e) => {
            report_action_error("respond", &e);
            Err(e.into())
        }
    }
}
