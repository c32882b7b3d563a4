use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::actions::ActionDispatcher;
use crate::api::{ApiClient, ApiError};
use crate::config::ReachConfig;
use crate::connection::{ConnectionManager, ConnectionTiming, WsTransport};
use crate::dashboard::runtime::Dashboard;
use crate::dashboard::types::{DashboardChannels, DashboardInput};
use crate::state::DashboardStore;

/// A running dashboard: live channel, state owner and action dispatcher.
pub struct DashboardHandle {
    channels: DashboardChannels,
    actions: ActionDispatcher,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

/// Connect to the backend and start keeping the dashboard current.
///
/// Must be called inside a tokio runtime. Sessions and meetings are polled
/// once at start; sessions again whenever an SDR run completes.
pub fn launch(config: &ReachConfig) -> Result<DashboardHandle, ApiError> {
    let api = ApiClient::new(config.server.base_url())?;
    let cancel = CancellationToken::new();

    let transport = WsTransport::new(config.server.ws_url());
    let (manager, connection) = ConnectionManager::new(
        transport,
        ConnectionTiming::from(&config.connection),
        cancel.child_token(),
    );
    let (dashboard, channels) = Dashboard::new(
        DashboardStore::new(config.dashboard.event_log_capacity()),
        api.clone(),
        connection,
        cancel.child_token(),
    );

    let tasks = vec![tokio::spawn(manager.run()), tokio::spawn(dashboard.run())];

    let handle = DashboardHandle {
        channels,
        actions: ActionDispatcher::new(api, config),
        cancel,
        tasks,
    };
    handle.refresh(DashboardInput::RefreshSessions);
    handle.refresh(DashboardInput::RefreshMeetings);

    info!(
        event = "core.dashboard.launch_completed",
        server = config.server.base_url()
    );
    Ok(handle)
}

impl DashboardHandle {
    pub fn channels(&self) -> &DashboardChannels {
        &self.channels
    }

    pub fn actions(&self) -> &ActionDispatcher {
        &self.actions
    }

    /// Ask the runtime to poll again.
    pub fn refresh(&self, input: DashboardInput) {
        if self.channels.inputs.send(input).is_err() {
            warn!(event = "core.dashboard.refresh_dropped");
        }
    }

    /// Stop the live channel and the runtime, then wait for both.
    pub async fn shutdown(self) {
        info!(event = "core.dashboard.shutdown_started");
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!(event = "core.dashboard.task_failed", error = %e);
            }
        }
        info!(event = "core.dashboard.shutdown_completed");
    }
}
