use crate::header::HeaderMap;
use crate::rpc::RpcPriority;
use std::time::Duration;

/// Per-call options.
///
/// A timeout set here overrides the connection-wide timeout for this call
/// only. A zero timeout disables the deadline for the call.
#[derive(Debug, Clone, Default)]
pub struct RpcOptions {
    timeout: Option<Duration>,
    priority: Option<RpcPriority>,
    write_headers: HeaderMap,
}

impl RpcOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_priority(mut self, priority: RpcPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_write_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.write_headers.insert(key.into(), value.into());
        self
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn set_priority(&mut self, priority: Option<RpcPriority>) {
        self.priority = priority;
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn priority(&self) -> Option<RpcPriority> {
        self.priority
    }

    pub fn write_headers(&self) -> &HeaderMap {
        &self.write_headers
    }
}
