//! Drives one live-update channel at a time: connect, serve, reconnect.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::connection::lifecycle::{ConnectionState, Lifecycle, LifecycleAction};
use crate::connection::transport::{Link, Transport};
use crate::protocol::OutboundMessage;

/// What the manager reports to its consumer, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    StateChanged(ConnectionState),
    Frame(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionTiming {
    pub heartbeat_interval: Duration,
    pub reconnect_delay: Duration,
    pub error_close_grace: Duration,
}

impl From<&ConnectionConfig> for ConnectionTiming {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            heartbeat_interval: config.heartbeat_interval(),
            reconnect_delay: config.reconnect_delay(),
            error_close_grace: config.error_close_grace(),
        }
    }
}

impl Default for ConnectionTiming {
    fn default() -> Self {
        Self::from(&ConnectionConfig::default())
    }
}

/// The consumer's ends of the manager's channels.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub events: mpsc::UnboundedReceiver<LinkEvent>,
    pub outbound: mpsc::UnboundedSender<OutboundMessage>,
}

/// Timers owned by the running loop, set and cleared by lifecycle actions.
#[derive(Default)]
struct Timers {
    heartbeat: Option<Interval>,
    error_grace: Option<Instant>,
    reconnect: Option<Duration>,
}

enum Served {
    Closed,
    Cancelled,
}

pub struct ConnectionManager<T: Transport> {
    transport: T,
    timing: ConnectionTiming,
    lifecycle: Lifecycle,
    events_tx: mpsc::UnboundedSender<LinkEvent>,
    outbound_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    cancel: CancellationToken,
}

impl<T: Transport> ConnectionManager<T> {
    pub fn new(
        transport: T,
        timing: ConnectionTiming,
        cancel: CancellationToken,
    ) -> (Self, ConnectionHandle) {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let manager = Self {
            transport,
            timing,
            lifecycle: Lifecycle::new(timing.reconnect_delay, timing.error_close_grace),
            events_tx,
            outbound_rx,
            cancel,
        };
        (manager, ConnectionHandle { events, outbound })
    }

    /// Run until cancelled. Reconnects forever with a constant delay.
    pub async fn run(mut self) {
        info!(
            event = "core.connection.manager_started",
            endpoint = %self.transport.endpoint()
        );

        let mut timers = Timers::default();

        loop {
            let actions = self.lifecycle.begin_connect();
            self.apply(actions, &mut timers);

            let attempt = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                result = self.transport.connect() => result,
            };

            match attempt {
                Ok(link) => {
                    info!(
                        event = "core.connection.open_completed",
                        endpoint = %self.transport.endpoint()
                    );
                    let actions = self.lifecycle.on_open();
                    self.apply(actions, &mut timers);
                    if let Served::Cancelled = self.serve(link, &mut timers).await {
                        break;
                    }
                }
                Err(e) => {
                    warn!(event = "core.connection.open_failed", error = %e);
                    let actions = self.lifecycle.on_connect_failed();
                    self.apply(actions, &mut timers);
                }
            }

            let Some(delay) = timers.reconnect.take() else {
                break;
            };
            debug!(
                event = "core.connection.reconnect_scheduled",
                delay_ms = delay.as_millis() as u64
            );
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                () = time::sleep(delay) => {}
            }
        }

        let actions = self.lifecycle.shutdown();
        self.apply(actions, &mut timers);
        info!(event = "core.connection.manager_stopped");
    }

    async fn serve(&mut self, mut link: Link, timers: &mut Timers) -> Served {
        // Replies queued for a previous socket are meaningless on this one
        while self.outbound_rx.try_recv().is_ok() {}

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    if let Err(e) = link.sink.close().await {
                        debug!(event = "core.connection.close_failed", error = %e);
                    }
                    return Served::Cancelled;
                }
                frame = link.stream.next() => match frame {
                    Some(Ok(text)) => self.emit(LinkEvent::Frame(text)),
                    Some(Err(e)) => {
                        warn!(event = "core.connection.transport_error", error = %e);
                        let actions = self.lifecycle.on_error();
                        self.apply(actions, timers);
                    }
                    None => {
                        info!(event = "core.connection.closed");
                        let actions = self.lifecycle.on_close();
                        self.apply(actions, timers);
                        return Served::Closed;
                    }
                },
                () = next_tick(&mut timers.heartbeat) => {
                    debug!(event = "core.connection.heartbeat_sent");
                    self.send(&mut link, OutboundMessage::Heartbeat, timers).await;
                }
                Some(msg) = self.outbound_rx.recv() => {
                    self.send(&mut link, msg, timers).await;
                }
                () = until(timers.error_grace) => {
                    warn!(event = "core.connection.close_forced");
                    let actions = self.lifecycle.on_error_grace_expired();
                    self.apply(actions, timers);
                    return Served::Closed;
                }
            }
        }
    }

    async fn send(&mut self, link: &mut Link, msg: OutboundMessage, timers: &mut Timers) {
        if !self.lifecycle.is_open() {
            debug!(event = "core.connection.send_skipped", message = ?msg);
            return;
        }
        if let Err(e) = link.sink.send(msg.to_json()).await {
            warn!(event = "core.connection.send_failed", error = %e);
            let actions = self.lifecycle.on_error();
            self.apply(actions, timers);
        }
    }

    fn apply(&self, actions: Vec<LifecycleAction>, timers: &mut Timers) {
        for action in actions {
            match action {
                LifecycleAction::Notify(state) => {
                    info!(event = "core.connection.state_changed", state = %state);
                    self.emit(LinkEvent::StateChanged(state));
                }
                LifecycleAction::StartHeartbeat => {
                    let period = self.timing.heartbeat_interval;
                    let mut interval = time::interval_at(Instant::now() + period, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    timers.heartbeat = Some(interval);
                }
                LifecycleAction::StopHeartbeat => timers.heartbeat = None,
                LifecycleAction::ScheduleReconnect(delay) => timers.reconnect = Some(delay),
                LifecycleAction::ArmErrorGrace(grace) => {
                    timers.error_grace = Some(Instant::now() + grace);
                }
                LifecycleAction::DisarmErrorGrace => timers.error_grace = None,
            }
        }
    }

    fn emit(&self, event: LinkEvent) {
        if self.events_tx.send(event).is_err() {
            debug!(event = "core.connection.consumer_gone");
        }
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::{RemoteEnd, ScriptedTransport};
    use std::sync::Arc;

    const HEARTBEAT: &str = r#"{"type":"heartbeat"}"#;

    fn timing() -> ConnectionTiming {
        ConnectionTiming {
            heartbeat_interval: Duration::from_secs(300),
            reconnect_delay: Duration::from_millis(2000),
            error_close_grace: Duration::from_millis(5000),
        }
    }

    fn start(
        transport: Arc<ScriptedTransport>,
    ) -> (ConnectionHandle, CancellationToken, tokio::task::JoinHandle<()>) {
        let cancel = CancellationToken::new();
        let (manager, handle) = ConnectionManager::new(transport, timing(), cancel.clone());
        let task = tokio::spawn(manager.run());
        (handle, cancel, task)
    }

    fn drain(events: &mut mpsc::UnboundedReceiver<LinkEvent>) -> Vec<LinkEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    fn gaps(attempts: &[Instant]) -> Vec<Duration> {
        attempts.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_cadence_while_open() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut remote = transport.push_link();
        let (_handle, cancel, task) = start(transport.clone());

        time::sleep(Duration::from_secs(299)).await;
        assert!(remote.received().is_empty());

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(remote.received(), vec![HEARTBEAT]);

        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(remote.received(), vec![HEARTBEAT, HEARTBEAT]);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_heartbeat_after_close() {
        let transport = Arc::new(ScriptedTransport::new());
        let RemoteEnd {
            to_client,
            mut from_client,
        } = transport.push_link();
        let (_handle, cancel, task) = start(transport.clone());

        time::sleep(Duration::from_secs(1)).await;
        drop(to_client);

        time::sleep(Duration::from_secs(1200)).await;
        let mut sent = Vec::new();
        while let Ok(Some(frame)) = from_client.try_next() {
            sent.push(frame);
        }
        assert!(sent.is_empty());

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_attempts_every_delay() {
        let transport = Arc::new(ScriptedTransport::new());
        let (_handle, cancel, task) = start(transport.clone());

        time::sleep(Duration::from_millis(7000)).await;
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 4);
        assert!(gaps(&attempts).iter().all(|g| *g == Duration::from_millis(2000)));

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_then_close_reconnects_once() {
        let transport = Arc::new(ScriptedTransport::new());
        let remote = transport.push_link();
        let (mut handle, cancel, task) = start(transport.clone());

        time::sleep(Duration::from_millis(100)).await;
        remote.fail("reset by peer");
        drop(remote);

        time::sleep(Duration::from_millis(2050)).await;
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[1] - attempts[0], Duration::from_millis(2100));

        let states: Vec<LinkEvent> = drain(&mut handle.events);
        assert_eq!(
            states,
            vec![
                LinkEvent::StateChanged(ConnectionState::Connecting),
                LinkEvent::StateChanged(ConnectionState::Connected),
                LinkEvent::StateChanged(ConnectionState::Disconnected),
                LinkEvent::StateChanged(ConnectionState::Connecting),
                LinkEvent::StateChanged(ConnectionState::Disconnected),
            ]
        );

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_without_close_is_forced_after_grace() {
        let transport = Arc::new(ScriptedTransport::new());
        let remote = transport.push_link();
        let (_handle, cancel, task) = start(transport.clone());

        remote.fail("stalled");
        // The remote end stays alive, so no close ever arrives on its own
        time::sleep(Duration::from_millis(6000)).await;
        assert_eq!(transport.attempts().len(), 1);

        time::sleep(Duration::from_millis(1500)).await;
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[1] - attempts[0], Duration::from_millis(7000));

        drop(remote);
        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_and_replies_pass_through() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut remote = transport.push_link();
        let (mut handle, cancel, task) = start(transport.clone());

        remote.send(r#"{"type":"keepalive"}"#);
        time::sleep(Duration::from_millis(10)).await;

        let events = drain(&mut handle.events);
        assert_eq!(
            events.last(),
            Some(&LinkEvent::Frame(r#"{"type":"keepalive"}"#.to_string()))
        );

        handle.outbound.send(OutboundMessage::HeartbeatAck).unwrap();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(remote.received(), vec![r#"{"type":"heartbeat_ack"}"#]);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_reconnecting() {
        let transport = Arc::new(ScriptedTransport::new());
        let remote = transport.push_link();
        let (mut handle, cancel, task) = start(transport.clone());

        time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        task.await.unwrap();
        drop(remote);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(transport.attempts().len(), 1);
        assert_eq!(
            drain(&mut handle.events).last(),
            Some(&LinkEvent::StateChanged(ConnectionState::Disconnected))
        );
    }
}
