use std::time::Duration;

/// Requests a loopback connection accepts before reporting saturation.
pub const DEFAULT_MAX_PENDING_REQUESTS: usize = 256;

/// Connection-wide timeout of a loopback connection. Zero means none.
pub const DEFAULT_LOOPBACK_TIMEOUT: Duration = Duration::ZERO;

/// Thread name prefix for event base threads.
pub const EVENT_BASE_THREAD_PREFIX: &str = "muxchan-evb";
