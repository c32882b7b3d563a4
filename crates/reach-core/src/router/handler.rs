use std::convert::Infallible;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::protocol::{self, AgentEvent, AgentEventKind, InboundMessage, OutboundMessage};
use crate::router::errors::RouteError;
use crate::router::types::{Effect, Routed};
use crate::state::{Command, Event, EventLogEntry, Store};

/// Route one raw text frame into store commands and runtime effects.
///
/// The frame and every payload it carries are decoded before the store is
/// touched. A malformed frame returns an error and leaves the store as it was.
/// Leads without a `place_id` are skipped by the store; the event is still
/// logged.
pub fn route<S>(raw: &str, store: &mut S) -> Result<Routed, RouteError>
where
    S: Store<Error = Infallible>,
{
    route_at(raw, store, Utc::now())
}

/// Like [`route`], with an explicit receive time for log entries.
pub fn route_at<S>(raw: &str, store: &mut S, received_at: DateTime<Utc>) -> Result<Routed, RouteError>
where
    S: Store<Error = Infallible>,
{
    let message = protocol::decode_inbound(raw).map_err(|source| RouteError::Decode { source })?;
    let plan = plan(message, received_at)?;

    let mut events = Vec::new();
    for cmd in plan.commands {
        match store.dispatch(cmd) {
            Ok(applied) => events.extend(applied),
            Err(never) => match never {},
        }
    }
    events.extend(plan.notices);

    Ok(Routed {
        events,
        effects: plan.effects,
    })
}

#[derive(Default)]
struct Plan {
    /// Lead upserts come before the log entry that announces them.
    commands: Vec<Command>,
    notices: Vec<Event>,
    effects: Vec<Effect>,
}

fn plan(message: InboundMessage, received_at: DateTime<Utc>) -> Result<Plan, RouteError> {
    let mut plan = Plan::default();

    match message {
        InboundMessage::Init {
            businesses,
            recent_events,
        } => {
            info!(
                event = "core.router.init_received",
                businesses = businesses.as_ref().map(Vec::len),
                recent_events = recent_events.as_ref().map(Vec::len)
            );
            if let Some(businesses) = businesses {
                plan.commands.push(Command::ReplaceBusinesses { businesses });
            }
            for evt in recent_events.iter().flatten() {
                plan.commands.push(Command::LogEvent {
                    entry: EventLogEntry::from_agent_event(evt, received_at),
                });
            }
        }
        InboundMessage::AgentEvent(evt) => plan_agent_event(&mut plan, evt, received_at)?,
        InboundMessage::HumanInputRequest { prompt, request_id } => {
            info!(event = "core.router.human_input_requested", request_id = %request_id);
            plan.notices.push(Event::HumanInputRequested { request_id, prompt });
        }
        InboundMessage::Heartbeat => {
            plan.effects.push(Effect::Reply(OutboundMessage::HeartbeatAck));
        }
        InboundMessage::Keepalive | InboundMessage::Pong => {
            debug!(event = "core.router.keepalive_received");
        }
        InboundMessage::Unknown => {
            debug!(event = "core.router.unknown_type_ignored");
        }
    }

    Ok(plan)
}

fn plan_agent_event(
    plan: &mut Plan,
    evt: AgentEvent,
    received_at: DateTime<Utc>,
) -> Result<(), RouteError> {
    let payload_error = |source| RouteError::Payload {
        event: evt.event.clone(),
        source,
    };

    match evt.kind() {
        AgentEventKind::LeadFound => {
            if let Some(business) = evt.business_payload() {
                let business = business.map_err(payload_error)?;
                plan.commands.push(Command::UpsertBusinesses {
                    businesses: vec![business],
                });
            }
        }
        AgentEventKind::SearchCompleted => {
            if let Some(leads) = evt.leads_payload() {
                let businesses = leads.map_err(payload_error)?;
                plan.commands.push(Command::UpsertBusinesses { businesses });
            }
        }
        AgentEventKind::MeetingScheduled => {
            plan.commands.push(Command::IncrementMeetingCounter);
        }
        AgentEventKind::SdrCompleted => {
            plan.effects.push(Effect::RefetchSessions);
        }
        AgentEventKind::ProcessingCompleted | AgentEventKind::Error => {}
        AgentEventKind::Other => {
            debug!(event = "core.router.agent_event_logged", name = %evt.event);
        }
    }

    plan.commands.push(Command::LogEvent {
        entry: EventLogEntry::from_agent_event(&evt, received_at),
    });

    if evt.is_terminal() {
        info!(event = "core.router.workflow_finished", name = %evt.event);
        plan.notices.push(Event::WorkflowFinished { event: evt.event });
    }

    Ok(())
}
