use clap::ArgMatches;
use tracing::info;

use super::helpers::{dispatcher, load_config, report_action_error, runtime};

pub(crate) fn handle_process_emails_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches)?;
    let max_emails = matches
        .get_one::<u32>("max-emails")
        .copied()
        .unwrap_or_else(|| config.email.max_emails());
    let dispatcher = dispatcher(&config)?;

    info!(event = "cli.process_emails_started", max_emails = max_emails);

    match runtime()?.block_on(dispatcher.process_emails(Some(max_emails))) {
        Ok(_) => {
            println!("📧 Email processing started (up to {} emails)", max_emails);
            info!(event = "cli.process_emails_completed");
            Ok(())
        }
        Err(e) => {
            report_action_error("process-emails", &e);
            Err(e.into())
        }
    }
}
