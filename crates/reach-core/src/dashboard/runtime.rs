use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::connection::{ConnectionHandle, LinkEvent};
use crate::dashboard::types::{DashboardChannels, DashboardInput};
use crate::protocol::OutboundMessage;
use crate::router::{self, Effect};
use crate::state::{Command, DashboardStore, Event, Store};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Single owner of the dashboard state.
///
/// Handles one input at a time: live-channel frames in delivery order, plus
/// fetch results from the poll tasks it spawns.
pub struct Dashboard {
    store: DashboardStore,
    api: ApiClient,
    link_events: mpsc::UnboundedReceiver<LinkEvent>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
    inputs_tx: mpsc::UnboundedSender<DashboardInput>,
    inputs_rx: mpsc::UnboundedReceiver<DashboardInput>,
    snapshot_tx: watch::Sender<crate::state::DashboardSnapshot>,
    events_tx: broadcast::Sender<Event>,
    cancel: CancellationToken,
}

impl Dashboard {
    pub fn new(
        store: DashboardStore,
        api: ApiClient,
        connection: ConnectionHandle,
        cancel: CancellationToken,
    ) -> (Self, DashboardChannels) {
        let (snapshot_tx, snapshot) = watch::channel(store.snapshot());
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();

        let channels = DashboardChannels {
            snapshot,
            events: events_tx.clone(),
            inputs: inputs_tx.clone(),
        };
        let dashboard = Self {
            store,
            api,
            link_events: connection.events,
            outbound: connection.outbound,
            inputs_tx,
            inputs_rx,
            snapshot_tx,
            events_tx,
            cancel,
        };
        (dashboard, channels)
    }

    pub async fn run(mut self) {
        info!(event = "core.dashboard.run_started");

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                Some(event) = self.link_events.recv() => self.on_link_event(event),
                Some(input) = self.inputs_rx.recv() => self.on_input(input),
                else => break,
            }
        }

        info!(event = "core.dashboard.run_completed");
    }

    fn on_link_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::StateChanged(state) => self.apply(Command::SetConnection { state }),
            LinkEvent::Frame(raw) => match router::route(&raw, &mut self.store) {
                Ok(routed) => {
                    self.publish(routed.events);
                    for effect in routed.effects {
                        self.execute(effect);
                    }
                }
                Err(e) => {
                    warn!(event = "core.dashboard.message_dropped", error = %e);
                }
            },
        }
    }

    fn on_input(&mut self, input: DashboardInput) {
        match input {
            DashboardInput::RefreshSessions => self.spawn_sessions_fetch(),
            DashboardInput::RefreshMeetings => self.spawn_meetings_fetch(),
            DashboardInput::SessionsFetched(sessions) => {
                self.apply(Command::ReplaceSessions { sessions })
            }
            DashboardInput::MeetingsFetched(meetings) => {
                self.apply(Command::ReplaceMeetings { meetings })
            }
        }
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::Reply(msg) => {
                if self.outbound.send(msg).is_err() {
                    debug!(event = "core.dashboard.reply_dropped", message = ?msg);
                }
            }
            Effect::RefetchSessions => self.spawn_sessions_fetch(),
        }
    }

    fn apply(&mut self, cmd: Command) {
        match self.store.dispatch(cmd) {
            Ok(events) => self.publish(events),
            Err(never) => match never {},
        }
    }

    fn publish(&self, events: Vec<Event>) {
        if events.is_empty() {
            return;
        }
        self.snapshot_tx.send_replace(self.store.snapshot());
        for event in events {
            if self.events_tx.send(event).is_err() {
                debug!(event = "core.dashboard.no_subscribers");
            }
        }
    }

    fn spawn_sessions_fetch(&self) {
        let api = self.api.clone();
        let inputs = self.inputs_tx.clone();
        tokio::spawn(async move {
            match api.fetch_sdr_sessions().await {
                Ok(Some(sessions)) => forward(&inputs, DashboardInput::SessionsFetched(sessions)),
                Ok(None) => {}
                Err(e) => warn!(event = "core.dashboard.sessions_fetch_failed", error = %e),
            }
        });
    }

    /// A failed meetings poll still publishes: derived meetings keep showing.
    fn spawn_meetings_fetch(&self) {
        let api = self.api.clone();
        let inputs = self.inputs_tx.clone();
        tokio::spawn(async move {
            let meetings = match api.fetch_meetings().await {
                Ok(meetings) => meetings,
                Err(e) => {
                    warn!(event = "core.dashboard.meetings_fetch_failed", error = %e);
                    Vec::new()
                }
            };
            forward(&inputs, DashboardInput::MeetingsFetched(meetings));
        });
    }
}

/// Hand a fetch result back to the runtime, if it is still running.
fn forward(inputs: &mpsc::UnboundedSender<DashboardInput>, input: DashboardInput) {
    if inputs.send(input).is_err() {
        debug!(event = "core.dashboard.fetch_result_dropped");
    }
}
