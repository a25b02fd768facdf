use crate::header::HeaderMap;
use crate::rpc::{ContextStack, ProtocolId};
use bytes::Bytes;

/// Successful reply delivered to a request callback.
#[derive(Debug)]
pub struct ClientResponse {
    pub request_id: u32,
    /// Protocol the request was sent with.
    pub protocol_id: ProtocolId,
    pub payload: Bytes,
    pub headers: HeaderMap,
    /// Context handed to the originating send, if any.
    pub context: Option<ContextStack>,
    /// Whether the connection reported an active security layer at send time.
    pub is_security_active: bool,
}
