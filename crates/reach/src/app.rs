use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("reach")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watch RapidReach agents and trigger outreach workflows")
        .long_about("reach connects to a RapidReach backend, follows the live agent activity feed and starts lead finding, SDR outreach and email processing runs.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .value_name("URL")
                .help("Backend base URL (overrides config)")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("watch")
                .about("Follow live agent activity and answer agent prompts")
        )
        .subcommand(
            Command::new("find-leads")
                .about("Start a lead search in a city")
                .arg(
                    Arg::new("city")
                        .long("city")
                        .short('c')
                        .help("City to search")
                        .required(true)
                )
                .arg(
                    Arg::new("max-results")
                        .long("max-results")
                        .help("Maximum number of leads (overrides config)")
                        .value_parser(clap::value_parser!(u32))
                )
        )
        .subcommand(
            Command::new("sdr")
                .about("Start SDR outreach for one business")
                .arg(
                    Arg::new("business-name")
                        .long("business-name")
                        .help("Business to contact")
                        .required(true)
                )
                .arg(
                    Arg::new("place-id")
                        .long("place-id")
                        .help("Lead identifier from the lead search")
                        .required(true)
                )
                .arg(Arg::new("phone").long("phone").help("Phone number to call"))
                .arg(Arg::new("email").long("email").help("Email address for the follow-up"))
                .arg(Arg::new("address").long("address").help("Street address"))
                .arg(Arg::new("city").long("city").help("City"))
                .arg(
                    Arg::new("skip-call")
                        .long("skip-call")
                        .help("Skip the phone call and go straight to email (overrides config)")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("deck-template")
                        .long("deck-template")
                        .help("Pitch deck template (overrides config)")
                )
        )
        .subcommand(
            Command::new("process-emails")
                .about("Process unread replies in the outreach inbox")
                .arg(
                    Arg::new("max-emails")
                        .long("max-emails")
                        .help("Maximum number of emails to process (overrides config)")
                        .value_parser(clap::value_parser!(u32))
                )
        )
        .subcommand(
            Command::new("leads")
                .about("List leads from the live channel's initial snapshot")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("sessions")
                .about("List SDR outreach sessions")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("meetings")
                .about("List scheduled meetings, including SDR follow-ups")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("stats")
                .about("Show lead, outreach and meeting counts")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("respond")
                .about("Answer an agent's human-input request")
                .arg(
                    Arg::new("request-id")
                        .long("request-id")
                        .help("Request identifier shown with the prompt")
                        .required(true)
                )
                .arg(
                    Arg::new("response")
                        .long("response")
                        .help("Answer to send")
                        .required(true)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell))
                )
        )
}
