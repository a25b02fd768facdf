use std::io;
use std::time::Duration;
use thiserror::Error;

/// Why a send was refused before it reached the connection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum UnavailableReason {
    /// The connection reported itself as not usable.
    #[error("connection is not usable")]
    NotGood,
    /// The channel (or its connection) has been closed.
    #[error("channel is closed")]
    Closed,
    /// The channel currently has no execution context to deliver callbacks on.
    #[error("no execution context attached")]
    NoExecutionContext,
}

/// What prevented an execution context from being detached.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum DetachBlocker {
    /// Requests are still waiting for their callbacks.
    #[error("{0} request(s) outstanding")]
    OutstandingRequests(usize),
    /// The connection is in the middle of an operation on the current context.
    #[error("connection is busy on its context")]
    ConnectionBusy,
}

/// Errors surfaced by a client channel, either synchronously or through a
/// request callback.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A send was attempted while the connection or channel could not take it.
    #[error("Connection unavailable: {0}")]
    ConnectionUnavailable(UnavailableReason),

    /// The execution context could not be detached safely.
    #[error("Execution context not detachable: {0}")]
    NotDetachable(DetachBlocker),

    /// The per-call deadline elapsed before a response arrived.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection reported an I/O failure.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] io::Error),
}

impl ChannelError {
    pub fn is_connection_unavailable(&self) -> bool {
        matches!(self, ChannelError::ConnectionUnavailable(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ChannelError::Timeout(_))
    }
}
