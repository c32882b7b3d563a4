use clap::ArgMatches;
use tracing::error;

pub mod helpers;

mod completions;
mod find_leads;
mod leads;
mod meetings;
mod process_emails;
mod respond;
mod sdr;
mod sessions;
mod stats;
mod watch;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("watch", sub_matches)) => watch::handle_watch_command(sub_matches),
        Some(("find-leads", sub_matches)) => find_leads::handle_find_leads_command(sub_matches),
        Some(("sdr", sub_matches)) => sdr::handle_sdr_command(sub_matches),
        Some(("process-emails", sub_matches)) => {
            process_emails::handle_process_emails_command(sub_matches)
        }
        Some(("leads", sub_matches)) => leads::handle_leads_command(sub_matches),
        Some(("sessions", sub_matches)) => sessions::handle_sessions_command(sub_matches),
        Some(("meetings", sub_matches)) => meetings::handle_meetings_command(sub_matches),
        Some(("stats", sub_matches)) => stats::handle_stats_command(sub_matches),
        Some(("respond", sub_matches)) => respond::handle_respond_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
