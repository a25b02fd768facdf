use super::CloseCallback;
use crate::connection::{SaturationStatus, TransportHandle};
use crate::error::ChannelError;
use crate::execution::ExecutionContextRef;
use crate::header::RequestHeader;
use crate::rpc::{ClientType, ContextStack, ProtocolId, RequestCallback, RpcOptions};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

/// Capability interface consumed by generated client stubs.
pub trait ClientChannel: Send + Sync {
    // --- REQUEST DISPATCH ---

    /// Sends a request that expects a response.
    ///
    /// Never blocks; the outcome is always delivered through `callback` on
    /// the channel's execution context. If the request cannot be handed to
    /// the connection, `callback` is failed synchronously before returning.
    fn send_request(
        &self,
        options: &RpcOptions,
        callback: Box<dyn RequestCallback>,
        context: Option<ContextStack>,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> u32;

    /// Sends a request that expects no response. Returns
    /// [`ONEWAY_REQUEST_ID`](crate::constants::ONEWAY_REQUEST_ID).
    fn send_oneway_request(
        &self,
        options: &RpcOptions,
        callback: Box<dyn RequestCallback>,
        context: Option<ContextStack>,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> u32;

    // --- CHANNEL-LOCAL STATE ---

    /// Context callbacks are marshaled onto.
    fn execution_context(&self) -> Option<ExecutionContextRef>;

    fn protocol_id(&self) -> ProtocolId;

    fn set_protocol_id(&mut self, protocol_id: ProtocolId);

    /// Replaces the close observer. A previously set observer is dropped
    /// without being called.
    fn set_close_callback(&self, callback: Option<Box<dyn CloseCallback>>);

    fn attach_execution_context(&self, context: ExecutionContextRef);

    fn detach_execution_context(&self) -> Result<(), ChannelError>;

    fn is_detachable(&self) -> bool;

    // --- DELEGATED TO THE CONNECTION ---
    // The connection may be shared, so these affect every channel using it.

    fn transport(&self) -> Option<Arc<dyn TransportHandle>>;

    fn good(&self) -> bool;

    fn saturation_status(&self) -> SaturationStatus;

    fn is_security_active(&self) -> bool;

    fn timeout(&self) -> Duration;

    fn set_timeout(&self, timeout: Duration);

    fn close_now(&self);

    fn client_type(&self) -> ClientType;
}
