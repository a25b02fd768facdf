use super::{CloseObserver, OutboundRequest, ResponseSink, SaturationStatus, TransportHandle};
use crate::execution::ExecutionContextRef;
use crate::rpc::ClientType;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// The transport-facing half of a channel.
///
/// A connection may be shared by any number of channels, so every mutating
/// method (`set_timeout`, `close_now`, attaching or detaching a context) is
/// observed by all of them. Implementations must tolerate calls from several
/// threads at once.
pub trait ClientConnection: Send + Sync {
    /// Hands a request to the connection.
    ///
    /// Must not block. Every outcome, including failures discovered later, is
    /// reported through `sink`: exactly one of `on_response` / `on_error` for
    /// two-way requests. For one-way requests the connection never calls
    /// `on_response`.
    fn send_request(&self, request: OutboundRequest, sink: Option<Box<dyn ResponseSink>>);

    fn transport(&self) -> Option<Arc<dyn TransportHandle>>;

    /// Whether the connection can currently take requests.
    fn good(&self) -> bool;

    fn saturation_status(&self) -> SaturationStatus;

    fn is_security_active(&self) -> bool;

    /// Context the connection runs on, adopted by channels constructed
    /// without an explicit one.
    fn execution_context(&self) -> Option<ExecutionContextRef>;

    fn attach_execution_context(&self, context: ExecutionContextRef);

    fn detach_execution_context(&self);

    /// `false` while the connection is mid-operation on its current context.
    fn is_detachable(&self) -> bool;

    /// Connection-wide default timeout. Zero means none.
    fn timeout(&self) -> Duration;

    fn set_timeout(&self, timeout: Duration);

    /// Closes the connection immediately and notifies close observers.
    fn close_now(&self);

    fn client_type(&self) -> ClientType;

    /// Registers an observer notified once when the connection closes. The
    /// connection keeps only the weak reference.
    fn add_close_observer(&self, observer: Weak<dyn CloseObserver>);
}
