use crate::TokioEventBase;
use crate::constants::{DEFAULT_LOOPBACK_TIMEOUT, DEFAULT_MAX_PENDING_REQUESTS};
use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use muxchan::connection::{
    ClientConnection, CloseObserver, InboundResponse, OutboundRequest, ResponseSink,
    SaturationStatus, TransportHandle,
};
use muxchan::execution::ExecutionContextRef;
use muxchan::header::HeaderMap;
use muxchan::rpc::{ClientType, ProtocolId, RpcKind};
use muxchan::{ChannelError, UnavailableReason};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Request as seen by the handler behind a [`LoopbackConnection`].
#[derive(Debug, Clone)]
pub struct LoopbackRequest {
    pub request_id: u32,
    pub kind: RpcKind,
    pub protocol_id: ProtocolId,
    pub headers: HeaderMap,
    pub payload: Bytes,
}

impl From<OutboundRequest> for LoopbackRequest {
    fn from(request: OutboundRequest) -> Self {
        Self {
            request_id: request.request_id,
            kind: request.kind,
            protocol_id: request.protocol_id,
            headers: request.headers,
            payload: request.payload,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoopbackConfig {
    /// Two-way requests in flight before sends are refused. Zero disables
    /// the limit.
    pub max_pending: usize,
    /// Connection-wide timeout; zero means none.
    pub default_timeout: Duration,
    pub security_active: bool,
    pub client_type: ClientType,
}

impl Default for LoopbackConfig {
    fn default() -> Self {
        Self {
            max_pending: DEFAULT_MAX_PENDING_REQUESTS,
            default_timeout: DEFAULT_LOOPBACK_TIMEOUT,
            security_active: false,
            client_type: ClientType::Header,
        }
    }
}

type LoopbackHandler =
    Arc<dyn Fn(LoopbackRequest) -> BoxFuture<'static, io::Result<InboundResponse>> + Send + Sync>;

/// In-process connection that serves requests with a handler running on an
/// event base of its own.
///
/// Deadlines are enforced here, and closing the connection fails every
/// request still waiting on the handler.
pub struct LoopbackConnection {
    runtime: Handle,
    handler: LoopbackHandler,
    config: LoopbackConfig,
    pending: Arc<AtomicUsize>,
    closed_tx: watch::Sender<bool>,
    state: Mutex<LoopbackState>,
}

struct LoopbackState {
    context: Option<ExecutionContextRef>,
    timeout: Duration,
    observers: Vec<Weak<dyn CloseObserver>>,
}

impl LoopbackConnection {
    pub fn new<F, Fut>(event_base: &TokioEventBase, config: LoopbackConfig, handler: F) -> Arc<Self>
    where
        F: Fn(LoopbackRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = io::Result<InboundResponse>> + Send + 'static,
    {
        let handler: LoopbackHandler = Arc::new(move |request| handler(request).boxed());
        let (closed_tx, _) = watch::channel(false);

        Arc::new(Self {
            runtime: event_base.runtime_handle().clone(),
            handler,
            state: Mutex::new(LoopbackState {
                context: Some(event_base.context()),
                timeout: config.default_timeout,
                observers: Vec::new(),
            }),
            config,
            pending: Arc::new(AtomicUsize::new(0)),
            closed_tx,
        })
    }

    pub fn is_closed(&self) -> bool {
        *self.closed_tx.borrow()
    }

    fn lock_state(&self) -> MutexGuard<'_, LoopbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserves a pending slot, or reports saturation.
    fn reserve_slot(&self) -> bool {
        let previous = self.pending.fetch_add(1, Ordering::SeqCst);
        if self.config.max_pending != 0 && previous >= self.config.max_pending {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return false;
        }
        true
    }
}

impl ClientConnection for LoopbackConnection {
    fn send_request(&self, request: OutboundRequest, sink: Option<Box<dyn ResponseSink>>) {
        if self.is_closed() {
            if let Some(sink) = sink {
                sink.on_error(ChannelError::ConnectionUnavailable(UnavailableReason::Closed));
            }
            return;
        }

        let expects_response = request.kind.expects_response();
        if expects_response && !self.reserve_slot() {
            tracing::warn!(request_id = request.request_id, "loopback connection saturated");
            if let Some(sink) = sink {
                sink.on_error(ChannelError::TransportFailure(io::Error::new(
                    io::ErrorKind::WouldBlock,
                    "loopback connection saturated",
                )));
            }
            return;
        }

        let handler = self.handler.clone();
        let pending = self.pending.clone();
        let closed_rx = self.closed_tx.subscribe();

        self.runtime.spawn(async move {
            let mut sink = sink;
            let request_id = request.request_id;
            let timeout = request.timeout;
            let call = handler(LoopbackRequest::from(request));

            if let Some(sink) = sink.as_mut() {
                sink.on_request_sent();
            }

            if !expects_response {
                if let Err(error) = call.await {
                    tracing::debug!(request_id, %error, "one-way handler failed");
                }
                return;
            }

            let outcome = tokio::select! {
                outcome = with_deadline(call, timeout) => outcome,
                _ = wait_closed(closed_rx) => Err(ChannelError::ConnectionUnavailable(
                    UnavailableReason::Closed,
                )),
            };
            pending.fetch_sub(1, Ordering::SeqCst);

            if let Some(sink) = sink {
                match outcome {
                    Ok(response) => sink.on_response(response),
                    Err(error) => {
                        tracing::debug!(request_id, %error, "loopback request failed");
                        sink.on_error(error);
                    }
                }
            }
        });
    }

    fn transport(&self) -> Option<Arc<dyn TransportHandle>> {
        Some(Arc::new(LoopbackTransport {
            closed_rx: self.closed_tx.subscribe(),
        }))
    }

    fn good(&self) -> bool {
        !self.is_closed()
    }

    fn saturation_status(&self) -> SaturationStatus {
        SaturationStatus::new(self.pending.load(Ordering::SeqCst), self.config.max_pending)
    }

    fn is_security_active(&self) -> bool {
        self.config.security_active
    }

    fn execution_context(&self) -> Option<ExecutionContextRef> {
        self.lock_state().context.clone()
    }

    fn attach_execution_context(&self, context: ExecutionContextRef) {
        self.lock_state().context = Some(context);
    }

    fn detach_execution_context(&self) {
        self.lock_state().context = None;
    }

    fn is_detachable(&self) -> bool {
        self.pending.load(Ordering::SeqCst) == 0
    }

    fn timeout(&self) -> Duration {
        self.lock_state().timeout
    }

    fn set_timeout(&self, timeout: Duration) {
        self.lock_state().timeout = timeout;
    }

    fn close_now(&self) {
        if self.closed_tx.send_replace(true) {
            return;
        }

        let observers = std::mem::take(&mut self.lock_state().observers);
        tracing::debug!(observers = observers.len(), "loopback connection closed");

        for observer in observers.iter().filter_map(Weak::upgrade) {
            observer.on_connection_closed();
        }
    }

    fn client_type(&self) -> ClientType {
        self.config.client_type
    }

    fn add_close_observer(&self, observer: Weak<dyn CloseObserver>) {
        if self.is_closed() {
            if let Some(observer) = observer.upgrade() {
                observer.on_connection_closed();
            }
            return;
        }
        self.lock_state().observers.push(observer);
    }
}

async fn with_deadline(
    call: BoxFuture<'static, io::Result<InboundResponse>>,
    timeout: Option<Duration>,
) -> Result<InboundResponse, ChannelError> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(ChannelError::from),
            Err(_) => Err(ChannelError::Timeout(limit)),
        },
        None => call.await.map_err(ChannelError::from),
    }
}

/// Resolves once the connection is closed or dropped.
async fn wait_closed(mut closed_rx: watch::Receiver<bool>) {
    loop {
        let closed = *closed_rx.borrow_and_update();
        if closed || closed_rx.changed().await.is_err() {
            return;
        }
    }
}

struct LoopbackTransport {
    closed_rx: watch::Receiver<bool>,
}

impl TransportHandle for LoopbackTransport {
    fn peer_address(&self) -> Option<SocketAddr> {
        None
    }

    fn local_address(&self) -> Option<SocketAddr> {
        None
    }

    fn is_open(&self) -> bool {
        !*self.closed_rx.borrow()
    }
}
