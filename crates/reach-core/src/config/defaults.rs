//! Built-in fallback values for configuration.

/// Backend serving both the HTTP API and the `/ws` channel.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const DEFAULT_WS_PATH: &str = "/ws";

/// Outbound `heartbeat` cadence (5 minutes) keeps idle proxies from
/// dropping the socket.
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 300;

/// Constant reconnect backoff. No jitter, no cap.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 2000;

/// Upper bound on waiting for a close event after a transport error.
pub const DEFAULT_ERROR_CLOSE_GRACE_MS: u64 = 5000;

pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 100;

pub const DEFAULT_MAX_RESULTS: u32 = 20;

pub const DEFAULT_DECK_TEMPLATE: &str = "professional";

pub const DEFAULT_MAX_EMAILS: u32 = 10;
