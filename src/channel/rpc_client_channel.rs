use super::channel_shared::ChannelShared;
use super::pending_requests::PendingRequest;
use super::response_sinks::{ChannelResponseSink, OnewayResponseSink};
use super::{ChannelState, ClientChannel, CloseCallback};
use crate::connection::{
    ClientConnection, OutboundRequest, ResponseSink, SaturationStatus, TransportHandle,
};
use crate::constants::{FIRST_REQUEST_ID, ONEWAY_REQUEST_ID};
use crate::error::{ChannelError, UnavailableReason};
use crate::execution::ExecutionContextRef;
use crate::header::{
    HeaderMap, RequestHeader, add_rpc_option_headers, global_default_headers, merge_headers,
    merge_into,
};
use crate::rpc::{ClientType, ContextStack, ProtocolId, RequestCallback, RpcKind, RpcOptions};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Request-dispatch channel over a (possibly shared) connection.
///
/// Requests are handed to the connection without blocking, and every
/// callback is marshaled onto the channel's execution context no matter which
/// thread the connection reports completion on.
pub struct RpcClientChannel {
    connection: Arc<dyn ClientConnection>,
    shared: Arc<ChannelShared>,
    protocol_id: ProtocolId,
    persistent_headers: HeaderMap,
    next_request_id: AtomicU32,
}

impl RpcClientChannel {
    /// Creates a channel whose callbacks run on `context`.
    pub fn new(connection: Arc<dyn ClientConnection>, context: ExecutionContextRef) -> Self {
        Self::build(connection, Some(context))
    }

    /// Creates a channel whose callbacks run on the connection's own context.
    ///
    /// If the connection has none, the channel stays `Constructed` until a
    /// context is attached.
    pub fn with_connection_context(connection: Arc<dyn ClientConnection>) -> Self {
        let context = connection.execution_context();
        Self::build(connection, context)
    }

    fn build(connection: Arc<dyn ClientConnection>, context: Option<ExecutionContextRef>) -> Self {
        let shared = Arc::new(ChannelShared::new(context));
        let observer = Arc::downgrade(&shared);
        connection.add_close_observer(observer);

        Self {
            connection,
            shared,
            protocol_id: ProtocolId::default(),
            persistent_headers: HeaderMap::new(),
            next_request_id: AtomicU32::new(FIRST_REQUEST_ID),
        }
    }

    pub fn connection(&self) -> &Arc<dyn ClientConnection> {
        &self.connection
    }

    pub fn state(&self) -> ChannelState {
        self.shared.state()
    }

    /// Two-way requests whose callbacks have not run yet.
    pub fn outstanding_requests(&self) -> usize {
        self.shared.outstanding()
    }

    /// Adds a header sent with every request of this channel. Persistent
    /// headers override process-wide defaults and are overridden by per-call
    /// headers.
    pub fn set_persistent_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.persistent_headers.insert(key.into(), value.into());
    }

    pub fn remove_persistent_header(&mut self, key: &str) -> Option<String> {
        self.persistent_headers.remove(key)
    }

    pub fn persistent_headers(&self) -> &HeaderMap {
        &self.persistent_headers
    }

    fn next_request_id(&self) -> u32 {
        loop {
            let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
            if id != 0 && id != ONEWAY_REQUEST_ID {
                return id;
            }
        }
    }

    /// Defaults (process-wide, then persistent) overridden by the per-call
    /// header, the option write headers and finally the reserved option
    /// headers.
    fn build_header_map(&self, options: &RpcOptions, header: Option<RequestHeader>) -> HeaderMap {
        let mut defaults = global_default_headers();
        merge_into(&mut defaults, &self.persistent_headers);

        let mut overrides = header
            .map(|mut header| header.take_write_headers())
            .unwrap_or_default();
        merge_into(&mut overrides, options.write_headers());
        add_rpc_option_headers(&mut overrides, options);

        merge_headers(&defaults, &overrides)
    }

    /// A per-call timeout wins over the connection-wide one; zero disables.
    fn effective_timeout(&self, options: &RpcOptions) -> Option<Duration> {
        let timeout = options
            .timeout()
            .unwrap_or_else(|| self.connection.timeout());
        (!timeout.is_zero()).then_some(timeout)
    }

    fn reject(request_id: u32, callback: Box<dyn RequestCallback>, reason: UnavailableReason) {
        tracing::debug!(request_id, %reason, "rejecting request before handoff");
        callback.on_response_error(ChannelError::ConnectionUnavailable(reason));
    }

    fn send_request_helper(
        &self,
        options: &RpcOptions,
        kind: RpcKind,
        callback: Box<dyn RequestCallback>,
        context: Option<ContextStack>,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> u32 {
        let request_id = self.next_request_id();
        let returned_id = if kind.expects_response() {
            request_id
        } else {
            ONEWAY_REQUEST_ID
        };

        if let Err(reason) = self.shared.sendable_context() {
            Self::reject(request_id, callback, reason);
            return returned_id;
        }

        if !self.connection.good() {
            Self::reject(request_id, callback, UnavailableReason::NotGood);
            return returned_id;
        }

        let is_security_active = self.connection.is_security_active();

        let sink: Box<dyn ResponseSink> = if kind.expects_response() {
            let pending =
                PendingRequest::new(callback, context, self.protocol_id, is_security_active);

            match self.shared.register(request_id, pending) {
                Ok(execution_context) => Box::new(ChannelResponseSink::new(
                    request_id,
                    self.shared.clone(),
                    execution_context,
                )),
                Err((reason, pending)) => {
                    if let Some(callback) = pending.callback {
                        Self::reject(request_id, callback, reason);
                    }
                    return returned_id;
                }
            }
        } else {
            match self.shared.sendable_context() {
                Ok(execution_context) => Box::new(OnewayResponseSink::new(
                    request_id,
                    callback,
                    execution_context,
                )),
                Err(reason) => {
                    Self::reject(request_id, callback, reason);
                    return returned_id;
                }
            }
        };

        let request = OutboundRequest {
            request_id,
            kind,
            protocol_id: self.protocol_id,
            headers: self.build_header_map(options, header),
            payload,
            timeout: self.effective_timeout(options),
        };

        tracing::debug!(
            request_id,
            ?kind,
            protocol = %request.protocol_id,
            bytes = request.payload.len(),
            timeout = ?request.timeout,
            "dispatching request"
        );

        self.connection.send_request(request, Some(sink));

        returned_id
    }
}

impl ClientChannel for RpcClientChannel {
    fn send_request(
        &self,
        options: &RpcOptions,
        callback: Box<dyn RequestCallback>,
        context: Option<ContextStack>,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> u32 {
        self.send_request_helper(
            options,
            RpcKind::SingleRequestSingleResponse,
            callback,
            context,
            payload,
            header,
        )
    }

    fn send_oneway_request(
        &self,
        options: &RpcOptions,
        callback: Box<dyn RequestCallback>,
        context: Option<ContextStack>,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> u32 {
        self.send_request_helper(
            options,
            RpcKind::SingleRequestNoResponse,
            callback,
            context,
            payload,
            header,
        )
    }

    fn execution_context(&self) -> Option<ExecutionContextRef> {
        self.shared.context()
    }

    fn protocol_id(&self) -> ProtocolId {
        self.protocol_id
    }

    fn set_protocol_id(&mut self, protocol_id: ProtocolId) {
        self.protocol_id = protocol_id;
    }

    fn set_close_callback(&self, callback: Option<Box<dyn CloseCallback>>) {
        self.shared.set_close_callback(callback);
    }

    fn attach_execution_context(&self, context: ExecutionContextRef) {
        self.connection.attach_execution_context(context.clone());
        self.shared.attach(context);
    }

    fn detach_execution_context(&self) -> Result<(), ChannelError> {
        self.shared.detach(self.connection.as_ref())
    }

    fn is_detachable(&self) -> bool {
        self.shared.outstanding() == 0 && self.connection.is_detachable()
    }

    fn transport(&self) -> Option<Arc<dyn TransportHandle>> {
        self.connection.transport()
    }

    fn good(&self) -> bool {
        self.connection.good()
    }

    fn saturation_status(&self) -> SaturationStatus {
        self.connection.saturation_status()
    }

    fn is_security_active(&self) -> bool {
        self.connection.is_security_active()
    }

    fn timeout(&self) -> Duration {
        self.connection.timeout()
    }

    fn set_timeout(&self, timeout: Duration) {
        self.connection.set_timeout(timeout);
    }

    fn close_now(&self) {
        self.connection.close_now();
        // Connections that do not report their own closure still end here.
        self.shared.close();
    }

    fn client_type(&self) -> ClientType {
        self.connection.client_type()
    }
}
