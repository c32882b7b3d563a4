use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use clap::ArgMatches;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use reach_core::{
    ActionDispatcher, DashboardHandle, Event, ReachConfig, Stats, Submission, events, launch,
};

use super::helpers::{load_config, runtime};
use crate::render;

/// Time left for in-flight responses once the watch loop ends.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Human-input requests waiting for an answer, oldest first.
///
/// Each stdin line answers the request at the front. A request id already
/// queued is not asked twice.
#[derive(Debug, Default)]
struct PendingPrompts {
    queue: VecDeque<(String, String)>,
}

impl PendingPrompts {
    /// Queue a request. Returns true when it is now the one being asked.
    fn push(&mut self, request_id: &str, prompt: &str) -> bool {
        if self.queue.iter().any(|(id, _)| id == request_id) {
            return false;
        }
        self.queue.push_back((request_id.to_string(), prompt.to_string()));
        self.queue.len() == 1
    }

    /// Pair a line with the oldest request.
    fn answer(&mut self, line: String) -> Option<(String, String)> {
        self.queue.pop_front().map(|(id, _)| (id, line))
    }

    fn current_prompt(&self) -> Option<&str> {
        self.queue.front().map(|(_, prompt)| prompt.as_str())
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

pub(crate) fn handle_watch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches)?;

    info!(event = "cli.watch_started", ws_url = %config.server.ws_url());

    let runtime = runtime()?;
    let result = runtime.block_on(watch(config));
    // A stdin read may still be parked on a blocking thread
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn watch(config: ReachConfig) -> Result<(), Box<dyn std::error::Error>> {
    let handle = match launch(&config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("❌ Failed to start dashboard: {}", e);
            error!(event = "cli.watch_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    println!("Watching {} (Ctrl+C to stop)", config.server.ws_url());

    let mut updates = handle.channels().subscribe();
    let mut last_stats: Option<Stats> = None;
    let mut pending = PendingPrompts::default();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut busy = handle.actions().gates().subscribe();
    let mut busy_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(event = "cli.watch_signal_failed", error = %e);
                }
                events::log_app_shutdown("interrupted");
                break;
            }
            received = updates.recv() => match received {
                Ok(event) => show(&event, &handle, &mut last_stats, &mut pending),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(event = "cli.watch_lagged", skipped = skipped);
                }
                Err(RecvError::Closed) => {
                    events::log_app_shutdown("dashboard stopped");
                    break;
                }
            },
            changed = busy.changed(), if busy_open => match changed {
                Ok(()) => {
                    if let Some(line) = render::busy_line(&handle.actions().gates().controls()) {
                        println!("{line}");
                    }
                }
                Err(_) => busy_open = false,
            },
            line = stdin.next_line(), if stdin_open && !pending.is_empty() => match line {
                Ok(Some(line)) => {
                    if let Some((request_id, answer)) = pending.answer(line) {
                        submit_answer(handle.actions().clone(), request_id, answer);
                    }
                    if let Some(prompt) = pending.current_prompt() {
                        ask(prompt);
                    }
                }
                Ok(None) => {
                    stdin_open = false;
                    eprintln!(
                        "stdin closed; answer pending requests with `reach respond --request-id <ID> --response <TEXT>`"
                    );
                    debug!(event = "cli.watch_stdin_closed", pending = pending.len());
                }
                Err(e) => {
                    stdin_open = false;
                    warn!(event = "cli.watch_stdin_failed", error = %e);
                }
            }
        }
    }

    handle.shutdown().await;
    info!(event = "cli.watch_completed");
    Ok(())
}

fn show(
    event: &Event,
    handle: &DashboardHandle,
    last_stats: &mut Option<Stats>,
    pending: &mut PendingPrompts,
) {
    if let Some(line) = render::event_line(event) {
        println!("{line}");
    }

    if let Event::HumanInputRequested { request_id, prompt } = event {
        let prompt = render::prompt_text(prompt.as_deref());
        if pending.push(request_id, prompt) {
            ask(prompt);
        } else {
            debug!(
                event = "cli.watch_prompt_queued",
                request_id = %request_id,
                pending = pending.len()
            );
        }
    }

    let stats = handle.channels().current().stats;
    if last_stats.as_ref() != Some(&stats) {
        println!("{}", render::stats_line(&stats));
        *last_stats = Some(stats);
    }
}

fn ask(prompt: &str) {
    print!("❓ {prompt} ");
    if let Err(e) = std::io::stdout().flush() {
        debug!(event = "cli.watch_flush_failed", error = %e);
    }
}

/// Send an answer without stalling the event feed.
fn submit_answer(actions: ActionDispatcher, request_id: String, answer: String) {
    tokio::spawn(async move {
        match actions.respond(&request_id, &answer).await {
            Ok(Submission::Sent) => println!("✅ Response sent."),
            Ok(Submission::Skipped) => println!("Empty response, nothing sent."),
            Err(e) => {
                eprintln!("❌ {}", e);
                error!(event = "cli.watch_respond_failed", request_id = %request_id, error = %e);
            }
        }
    });
}
