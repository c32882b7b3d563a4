use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::actions::errors::ActionError;
use crate::actions::types::{Action, ControlState};

/// Busy flags for the user actions, one per [`Action`].
///
/// Clones share the same flags. Subscribers are notified on every change.
#[derive(Debug, Clone)]
pub struct ActionGates {
    busy: Arc<watch::Sender<HashSet<Action>>>,
}

impl Default for ActionGates {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionGates {
    pub fn new() -> Self {
        let (busy, _) = watch::channel(HashSet::new());
        Self {
            busy: Arc::new(busy),
        }
    }

    /// Mark `action` busy. Fails if a submission is already in flight.
    ///
    /// The gate reopens when the returned guard is dropped.
    pub fn try_acquire(&self, action: Action) -> Result<GateGuard, ActionError> {
        let acquired = self.busy.send_if_modified(|busy| busy.insert(action));
        if !acquired {
            debug!(event = "core.actions.gate_busy", action = %action);
            return Err(ActionError::Busy { action });
        }
        debug!(event = "core.actions.gate_acquired", action = %action);
        Ok(GateGuard {
            gates: self.clone(),
            action,
        })
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.busy.borrow().contains(&action)
    }

    pub fn control(&self, action: Action) -> ControlState {
        if self.is_busy(action) {
            ControlState::busy(action)
        } else {
            ControlState::idle(action)
        }
    }

    /// Current state of every control.
    pub fn controls(&self) -> Vec<ControlState> {
        Action::ALL.iter().map(|a| self.control(*a)).collect()
    }

    /// Watch the set of busy actions.
    pub fn subscribe(&self) -> watch::Receiver<HashSet<Action>> {
        self.busy.subscribe()
    }

    fn release(&self, action: Action) {
        self.busy.send_if_modified(|busy| busy.remove(&action));
        debug!(event = "core.actions.gate_released", action = %action);
    }
}

/// Holds an action's gate closed. Dropping it reopens the gate.
#[derive(Debug)]
pub struct GateGuard {
    gates: ActionGates,
    action: Action,
}

impl GateGuard {
    pub fn action(&self) -> Action {
        self.action
    }
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.gates.release(self.action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused_while_busy() {
        let gates = ActionGates::new();
        let guard = gates.try_acquire(Action::FindLeads).unwrap();
        assert_eq!(guard.action(), Action::FindLeads);

        let second = gates.try_acquire(Action::FindLeads);
        assert!(matches!(
            second,
            Err(ActionError::Busy {
                action: Action::FindLeads
            })
        ));

        // Other actions are independent
        let _other = gates.try_acquire(Action::ProcessEmails).unwrap();
    }

    #[test]
    fn test_drop_releases_gate() {
        let gates = ActionGates::new();
        {
            let _guard = gates.try_acquire(Action::StartSdr).unwrap();
            assert!(gates.is_busy(Action::StartSdr));
            assert_eq!(gates.control(Action::StartSdr).label, "Starting SDR...");
        }
        assert!(!gates.is_busy(Action::StartSdr));
        assert!(gates.try_acquire(Action::StartSdr).is_ok());
    }

    #[test]
    fn test_controls_reflect_busy_set() {
        let gates = ActionGates::new();
        let _guard = gates.try_acquire(Action::ProcessEmails).unwrap();

        let controls = gates.controls();
        assert_eq!(controls.len(), 4);
        for control in controls {
            if control.action == Action::ProcessEmails {
                assert!(!control.enabled);
                assert_eq!(control.label, "Processing...");
            } else {
                assert!(control.enabled);
            }
        }
    }

    #[test]
    fn test_subscribers_see_changes() {
        let gates = ActionGates::new();
        let mut rx = gates.subscribe();
        assert!(!rx.has_changed().unwrap());

        let guard = gates.try_acquire(Action::HumanInput).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().contains(&Action::HumanInput));

        drop(guard);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }
}
