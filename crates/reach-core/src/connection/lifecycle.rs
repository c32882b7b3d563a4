//! Connection state machine, free of I/O.
//!
//! The manager feeds socket and timer happenings in and carries out the
//! returned actions. Keeping the rules here makes them testable without a
//! socket or a clock.

use std::time::Duration;

use serde::Serialize;

/// Connectivity of the live-update channel, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Connected => "Connected",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Something the manager must do in response to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Notify(ConnectionState),
    StartHeartbeat,
    StopHeartbeat,
    ScheduleReconnect(Duration),
    ArmErrorGrace(Duration),
    DisarmErrorGrace,
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: ConnectionState,
    reconnect_delay: Duration,
    error_close_grace: Duration,
    reconnect_pending: bool,
    error_pending: bool,
    shut_down: bool,
}

impl Lifecycle {
    pub fn new(reconnect_delay: Duration, error_close_grace: Duration) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            reconnect_delay,
            error_close_grace,
            reconnect_pending: false,
            error_pending: false,
            shut_down: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Open and not yet failing, so outbound frames may be sent.
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Connected && !self.error_pending
    }

    /// A connect attempt starts. Consumes the pending reconnect.
    pub fn begin_connect(&mut self) -> Vec<LifecycleAction> {
        if self.shut_down || self.state != ConnectionState::Disconnected {
            return Vec::new();
        }
        self.reconnect_pending = false;
        self.error_pending = false;
        self.state = ConnectionState::Connecting;
        vec![LifecycleAction::Notify(ConnectionState::Connecting)]
    }

    pub fn on_open(&mut self) -> Vec<LifecycleAction> {
        if self.shut_down || self.state != ConnectionState::Connecting {
            return Vec::new();
        }
        self.state = ConnectionState::Connected;
        vec![
            LifecycleAction::Notify(ConnectionState::Connected),
            LifecycleAction::StartHeartbeat,
        ]
    }

    /// A transport error. The close that normally follows schedules the
    /// reconnect; the grace timer forces one if it never comes.
    pub fn on_error(&mut self) -> Vec<LifecycleAction> {
        if self.state == ConnectionState::Disconnected || self.error_pending {
            return Vec::new();
        }
        self.error_pending = true;
        vec![
            LifecycleAction::StopHeartbeat,
            LifecycleAction::ArmErrorGrace(self.error_close_grace),
        ]
    }

    pub fn on_close(&mut self) -> Vec<LifecycleAction> {
        if self.state == ConnectionState::Disconnected {
            return Vec::new();
        }

        let mut actions = vec![LifecycleAction::StopHeartbeat];
        if self.error_pending {
            self.error_pending = false;
            actions.push(LifecycleAction::DisarmErrorGrace);
        }
        self.state = ConnectionState::Disconnected;
        actions.push(LifecycleAction::Notify(ConnectionState::Disconnected));

        if !self.shut_down && !self.reconnect_pending {
            self.reconnect_pending = true;
            actions.push(LifecycleAction::ScheduleReconnect(self.reconnect_delay));
        }
        actions
    }

    /// No close arrived in time after an error: close on the socket's behalf.
    pub fn on_error_grace_expired(&mut self) -> Vec<LifecycleAction> {
        if !self.error_pending {
            return Vec::new();
        }
        self.on_close()
    }

    /// A connect attempt failed before opening. Treated as a close.
    pub fn on_connect_failed(&mut self) -> Vec<LifecycleAction> {
        self.on_close()
    }

    /// Manual teardown. Nothing is scheduled afterwards.
    pub fn shutdown(&mut self) -> Vec<LifecycleAction> {
        if self.shut_down {
            return Vec::new();
        }
        self.shut_down = true;
        self.reconnect_pending = false;

        let mut actions = vec![LifecycleAction::StopHeartbeat];
        if self.error_pending {
            self.error_pending = false;
            actions.push(LifecycleAction::DisarmErrorGrace);
        }
        if self.state != ConnectionState::Disconnected {
            self.state = ConnectionState::Disconnected;
            actions.push(LifecycleAction::Notify(ConnectionState::Disconnected));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleAction::*;

    const DELAY: Duration = Duration::from_millis(2000);
    const GRACE: Duration = Duration::from_millis(5000);

    fn connected() -> Lifecycle {
        let mut lc = Lifecycle::new(DELAY, GRACE);
        lc.begin_connect();
        lc.on_open();
        lc
    }

    #[test]
    fn test_open_starts_heartbeat() {
        let mut lc = Lifecycle::new(DELAY, GRACE);
        assert_eq!(
            lc.begin_connect(),
            vec![Notify(ConnectionState::Connecting)]
        );
        assert_eq!(
            lc.on_open(),
            vec![Notify(ConnectionState::Connected), StartHeartbeat]
        );
        assert!(lc.is_open());
    }

    #[test]
    fn test_close_schedules_one_reconnect() {
        let mut lc = connected();
        assert_eq!(
            lc.on_close(),
            vec![
                StopHeartbeat,
                Notify(ConnectionState::Disconnected),
                ScheduleReconnect(DELAY)
            ]
        );
        // A duplicate close does not stack a second reconnect
        assert!(lc.on_close().is_empty());
    }

    #[test]
    fn test_error_stops_heartbeat_without_reconnect() {
        let mut lc = connected();
        let actions = lc.on_error();
        assert_eq!(actions, vec![StopHeartbeat, ArmErrorGrace(GRACE)]);
        assert!(!actions.iter().any(|a| matches!(a, ScheduleReconnect(_))));
        assert!(!lc.is_open());
        assert_eq!(lc.state(), ConnectionState::Connected);

        // Repeated errors do not re-arm
        assert!(lc.on_error().is_empty());
    }

    #[test]
    fn test_error_then_close_reconnects_once() {
        let mut lc = connected();
        lc.on_error();
        let actions = lc.on_close();
        assert_eq!(
            actions,
            vec![
                StopHeartbeat,
                DisarmErrorGrace,
                Notify(ConnectionState::Disconnected),
                ScheduleReconnect(DELAY)
            ]
        );
        assert!(lc.on_error_grace_expired().is_empty());
    }

    #[test]
    fn test_grace_expiry_forces_close() {
        let mut lc = connected();
        lc.on_error();
        let actions = lc.on_error_grace_expired();
        assert!(actions.contains(&ScheduleReconnect(DELAY)));
        assert_eq!(lc.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_grace_expiry_without_error_is_ignored() {
        let mut lc = connected();
        assert!(lc.on_error_grace_expired().is_empty());
        assert!(lc.is_open());
    }

    #[test]
    fn test_failed_connect_schedules_reconnect() {
        let mut lc = Lifecycle::new(DELAY, GRACE);
        lc.begin_connect();
        assert_eq!(
            lc.on_connect_failed(),
            vec![
                StopHeartbeat,
                Notify(ConnectionState::Disconnected),
                ScheduleReconnect(DELAY)
            ]
        );
        // Next attempt consumes the pending reconnect
        assert_eq!(
            lc.begin_connect(),
            vec![Notify(ConnectionState::Connecting)]
        );
        assert!(lc.on_connect_failed().contains(&ScheduleReconnect(DELAY)));
    }

    #[test]
    fn test_shutdown_prevents_reconnect() {
        let mut lc = connected();
        assert_eq!(
            lc.shutdown(),
            vec![StopHeartbeat, Notify(ConnectionState::Disconnected)]
        );
        assert!(lc.on_close().is_empty());
        assert!(lc.begin_connect().is_empty());
        assert!(lc.shutdown().is_empty());
    }

    #[test]
    fn test_connection_state_labels() {
        assert_eq!(ConnectionState::Connected.to_string(), "Connected");
        assert_eq!(ConnectionState::Disconnected.label(), "Disconnected");
    }
}
