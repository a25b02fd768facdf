#![allow(dead_code)]

use muxchan::{ChannelError, RpcClientChannel};
use muxchan::connection::{
    ClientConnection, CloseObserver, InboundResponse, OutboundRequest, ResponseSink,
    SaturationStatus, TransportHandle,
};
use muxchan::execution::ExecutionContextRef;
use muxchan::rpc::{ClientResponse, ClientType, RequestCallback};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, ThreadId};
use std::time::Duration;

// --- Connection double ---

/// In-memory connection that records what it is given and lets the test
/// decide when (and from which thread) requests complete.
pub struct MockConnection {
    state: Mutex<MockState>,
}

struct MockState {
    good: bool,
    detachable: bool,
    timeout: Duration,
    security_active: bool,
    context: Option<ExecutionContextRef>,
    sent: Vec<OutboundRequest>,
    bytes_sent: usize,
    sinks: HashMap<u32, Box<dyn ResponseSink>>,
    observers: Vec<Weak<dyn CloseObserver>>,
    attach_count: usize,
    detach_count: usize,
}

impl MockConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                good: true,
                detachable: true,
                timeout: Duration::ZERO,
                security_active: false,
                context: None,
                sent: Vec::new(),
                bytes_sent: 0,
                sinks: HashMap::new(),
                observers: Vec::new(),
                attach_count: 0,
                detach_count: 0,
            }),
        })
    }

    pub fn with_context(context: ExecutionContextRef) -> Arc<Self> {
        let connection = Self::new();
        connection.state.lock().unwrap().context = Some(context);
        connection
    }

    pub fn set_good(&self, good: bool) {
        self.state.lock().unwrap().good = good;
    }

    pub fn set_detachable(&self, detachable: bool) {
        self.state.lock().unwrap().detachable = detachable;
    }

    pub fn set_security_active(&self, active: bool) {
        self.state.lock().unwrap().security_active = active;
    }

    pub fn sent_requests(&self) -> Vec<OutboundRequest> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn last_request(&self) -> OutboundRequest {
        self.state
            .lock()
            .unwrap()
            .sent
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn bytes_sent(&self) -> usize {
        self.state.lock().unwrap().bytes_sent
    }

    pub fn attach_count(&self) -> usize {
        self.state.lock().unwrap().attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.state.lock().unwrap().detach_count
    }

    fn take_sink(&self, request_id: u32) -> Option<Box<dyn ResponseSink>> {
        self.state.lock().unwrap().sinks.remove(&request_id)
    }

    /// Reports the request as written. Returns `false` if no sink is held.
    pub fn mark_sent(&self, request_id: u32) -> bool {
        let Some(mut sink) = self.take_sink(request_id) else {
            return false;
        };
        sink.on_request_sent();
        self.state.lock().unwrap().sinks.insert(request_id, sink);
        true
    }

    pub fn respond(&self, request_id: u32, response: InboundResponse) -> bool {
        match self.take_sink(request_id) {
            Some(sink) => {
                sink.on_response(response);
                true
            }
            None => false,
        }
    }

    pub fn fail(&self, request_id: u32, error: ChannelError) -> bool {
        match self.take_sink(request_id) {
            Some(sink) => {
                sink.on_error(error);
                true
            }
            None => false,
        }
    }

    /// Drops the sink without completing it, as a misbehaving connection would.
    pub fn drop_sink(&self, request_id: u32) -> bool {
        self.take_sink(request_id).is_some()
    }
}

impl ClientConnection for MockConnection {
    fn send_request(&self, request: OutboundRequest, sink: Option<Box<dyn ResponseSink>>) {
        let mut state = self.state.lock().unwrap();
        state.bytes_sent += request.payload.len();
        if let Some(sink) = sink {
            state.sinks.insert(request.request_id, sink);
        }
        state.sent.push(request);
    }

    fn transport(&self) -> Option<Arc<dyn TransportHandle>> {
        Some(Arc::new(MockTransport {
            open: self.good(),
        }))
    }

    fn good(&self) -> bool {
        self.state.lock().unwrap().good
    }

    fn saturation_status(&self) -> SaturationStatus {
        let state = self.state.lock().unwrap();
        SaturationStatus::new(state.sinks.len(), 16)
    }

    fn is_security_active(&self) -> bool {
        self.state.lock().unwrap().security_active
    }

    fn execution_context(&self) -> Option<ExecutionContextRef> {
        self.state.lock().unwrap().context.clone()
    }

    fn attach_execution_context(&self, context: ExecutionContextRef) {
        let mut state = self.state.lock().unwrap();
        state.context = Some(context);
        state.attach_count += 1;
    }

    fn detach_execution_context(&self) {
        let mut state = self.state.lock().unwrap();
        state.context = None;
        state.detach_count += 1;
    }

    fn is_detachable(&self) -> bool {
        self.state.lock().unwrap().detachable
    }

    fn timeout(&self) -> Duration {
        self.state.lock().unwrap().timeout
    }

    fn set_timeout(&self, timeout: Duration) {
        self.state.lock().unwrap().timeout = timeout;
    }

    fn close_now(&self) {
        let observers = {
            let mut state = self.state.lock().unwrap();
            state.good = false;
            std::mem::take(&mut state.observers)
        };

        for observer in observers {
            if let Some(observer) = observer.upgrade() {
                observer.on_connection_closed();
            }
        }
    }

    fn client_type(&self) -> ClientType {
        ClientType::Header
    }

    fn add_close_observer(&self, observer: Weak<dyn CloseObserver>) {
        self.state.lock().unwrap().observers.push(observer);
    }
}

struct MockTransport {
    open: bool,
}

impl TransportHandle for MockTransport {
    fn peer_address(&self) -> Option<SocketAddr> {
        None
    }

    fn local_address(&self) -> Option<SocketAddr> {
        None
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

// --- Callback double ---

#[derive(Default)]
pub struct CallbackLog {
    pub sent: Vec<ThreadId>,
    pub responses: Vec<(ClientResponse, ThreadId)>,
    pub errors: Vec<(ChannelError, ThreadId)>,
}

impl CallbackLog {
    pub fn completions(&self) -> usize {
        self.responses.len() + self.errors.len()
    }
}

pub struct RecordingCallback {
    log: Arc<Mutex<CallbackLog>>,
}

impl RequestCallback for RecordingCallback {
    fn on_request_sent(&mut self) {
        self.log.lock().unwrap().sent.push(thread::current().id());
    }

    fn on_response(self: Box<Self>, response: ClientResponse) {
        self.log
            .lock()
            .unwrap()
            .responses
            .push((response, thread::current().id()));
    }

    fn on_response_error(self: Box<Self>, error: ChannelError) {
        self.log
            .lock()
            .unwrap()
            .errors
            .push((error, thread::current().id()));
    }
}

pub fn recording_callback() -> (Box<dyn RequestCallback>, Arc<Mutex<CallbackLog>>) {
    let log = Arc::new(Mutex::new(CallbackLog::default()));
    (
        Box::new(RecordingCallback { log: log.clone() }),
        log,
    )
}

// --- Re-entrant callback ---

type SentHook = Box<dyn FnMut(&RpcClientChannel) + Send>;
type DoneHook = Box<dyn FnOnce(&RpcClientChannel, Result<ClientResponse, ChannelError>) + Send>;

/// Callback that calls back into the channel that is notifying it.
pub struct ReentrantCallback {
    channel: Weak<RpcClientChannel>,
    on_sent: SentHook,
    on_done: DoneHook,
}

impl ReentrantCallback {
    pub fn new<S, D>(
        channel: &Arc<RpcClientChannel>,
        on_sent: S,
        on_done: D,
    ) -> Box<dyn RequestCallback>
    where
        S: FnMut(&RpcClientChannel) + Send + 'static,
        D: FnOnce(&RpcClientChannel, Result<ClientResponse, ChannelError>) + Send + 'static,
    {
        Box::new(Self {
            channel: Arc::downgrade(channel),
            on_sent: Box::new(on_sent),
            on_done: Box::new(on_done),
        })
    }

    fn finish(self, outcome: Result<ClientResponse, ChannelError>) {
        if let Some(channel) = self.channel.upgrade() {
            (self.on_done)(&channel, outcome);
        }
    }
}

impl RequestCallback for ReentrantCallback {
    fn on_request_sent(&mut self) {
        if let Some(channel) = self.channel.upgrade() {
            (self.on_sent)(&channel);
        }
    }

    fn on_response(self: Box<Self>, response: ClientResponse) {
        self.finish(Ok(response));
    }

    fn on_response_error(self: Box<Self>, error: ChannelError) {
        self.finish(Err(error));
    }
}
