use crate::header::HeaderMap;
use crate::rpc::{ProtocolId, RpcKind};
use bytes::Bytes;
use std::time::Duration;

/// Everything a connection needs to put one request on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub request_id: u32,
    pub kind: RpcKind,
    pub protocol_id: ProtocolId,
    /// Fully merged headers; the connection sends them as-is.
    pub headers: HeaderMap,
    pub payload: Bytes,
    /// Effective deadline, already resolved between per-call and
    /// connection-wide settings. `None` means no deadline.
    pub timeout: Option<Duration>,
}

/// Raw reply handed back by a connection.
#[derive(Debug, Clone, Default)]
pub struct InboundResponse {
    pub payload: Bytes,
    pub headers: HeaderMap,
}

impl InboundResponse {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}
