use super::pending_requests::{PendingRequest, PendingRequests};
use super::{ChannelState, CloseCallback};
use crate::connection::{ClientConnection, CloseObserver, InboundResponse};
use crate::error::{ChannelError, DetachBlocker, UnavailableReason};
use crate::execution::{ExecutionContextRef, Task};
use crate::rpc::ClientResponse;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) struct ChannelStatus {
    pub state: ChannelState,
    pub context: Option<ExecutionContextRef>,
}

/// State of a channel that outlives any single call: lifecycle, the
/// execution context, in-flight requests and the close observer.
///
/// Response sinks handed to the connection hold a strong reference to this,
/// the connection holds only a weak one (as a close observer).
pub(crate) struct ChannelShared {
    status: Mutex<ChannelStatus>,
    pending: PendingRequests,
    close_callback: Mutex<Option<Box<dyn CloseCallback>>>,
}

impl ChannelShared {
    pub fn new(context: Option<ExecutionContextRef>) -> Self {
        let state = if context.is_some() {
            ChannelState::Active
        } else {
            ChannelState::Constructed
        };

        Self {
            status: Mutex::new(ChannelStatus { state, context }),
            pending: PendingRequests::default(),
            close_callback: Mutex::new(None),
        }
    }

    pub fn state(&self) -> ChannelState {
        self.lock_status().state
    }

    pub fn context(&self) -> Option<ExecutionContextRef> {
        self.lock_status().context.clone()
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Context a new request would be delivered on, or why none can be sent.
    pub fn sendable_context(&self) -> Result<ExecutionContextRef, UnavailableReason> {
        Self::sendable(&self.lock_status())
    }

    /// Records a two-way request, returning the context its callback will run
    /// on. Hands the request back if the channel cannot send.
    pub fn register(
        &self,
        request_id: u32,
        request: PendingRequest,
    ) -> Result<ExecutionContextRef, (UnavailableReason, PendingRequest)> {
        let status = self.lock_status();
        match Self::sendable(&status) {
            Ok(context) => {
                self.pending.insert(request_id, request);
                Ok(context)
            }
            Err(reason) => Err((reason, request)),
        }
    }

    /// Runs on the execution context once the connection wrote the request.
    ///
    /// The entry stays registered while the callback runs, so the request
    /// still counts as outstanding for detach and close.
    pub fn mark_sent(&self, request_id: u32) {
        let Some((mut callback, span)) = self.pending.lend_callback(request_id) else {
            return;
        };

        {
            let _entered = span.enter();
            callback.on_request_sent();
        }

        if let Err(callback) = self.pending.return_callback(request_id, callback) {
            // A close drained the registry while the callback was out.
            let _entered = span.enter();
            callback.on_response_error(ChannelError::ConnectionUnavailable(
                UnavailableReason::Closed,
            ));
        }
    }

    /// Runs on the execution context and delivers the final outcome.
    pub fn complete(&self, request_id: u32, outcome: Result<InboundResponse, ChannelError>) {
        let Some(request) = self.pending.take(request_id) else {
            tracing::trace!(request_id, "ignoring completion of a finished request");
            return;
        };

        let span = request.span();
        let Some(callback) = request.callback else {
            // The sent notification still holds the callback and fails it
            // once it finds the entry gone.
            tracing::warn!(request_id, "completion raced the sent notification");
            return;
        };

        match outcome {
            Ok(response) => {
                tracing::trace!(request_id, bytes = response.payload.len(), "response received");

                let _entered = span.enter();
                callback.on_response(ClientResponse {
                    request_id,
                    protocol_id: request.protocol_id,
                    payload: response.payload,
                    headers: response.headers,
                    context: request.context,
                    is_security_active: request.is_security_active,
                });
            }
            Err(error) => {
                tracing::debug!(request_id, %error, "request failed");
                let _entered = span.enter();
                callback.on_response_error(error);
            }
        }
    }

    pub fn attach(&self, context: ExecutionContextRef) {
        let mut status = self.lock_status();
        status.context = Some(context);
        if !status.state.is_closed() {
            status.state = ChannelState::Active;
        }
    }

    /// Clears the execution context if nothing depends on it.
    pub fn detach(&self, connection: &dyn ClientConnection) -> Result<(), ChannelError> {
        {
            let mut status = self.lock_status();

            let outstanding = self.pending.len();
            if outstanding > 0 {
                return Err(ChannelError::NotDetachable(
                    DetachBlocker::OutstandingRequests(outstanding),
                ));
            }

            if !connection.is_detachable() {
                return Err(ChannelError::NotDetachable(DetachBlocker::ConnectionBusy));
            }

            status.context = None;
            if !status.state.is_closed() {
                status.state = ChannelState::Detached;
            }
        }

        connection.detach_execution_context();
        Ok(())
    }

    pub fn set_close_callback(&self, callback: Option<Box<dyn CloseCallback>>) {
        *self
            .close_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = callback;
    }

    /// Moves the channel to `Closed`, failing everything still in flight and
    /// notifying the close callback. Later calls do nothing.
    pub fn close(&self) {
        let context = {
            let mut status = self.lock_status();
            if status.state.is_closed() {
                return;
            }
            status.state = ChannelState::Closed;
            status.context.clone()
        };

        let pending = self.pending.drain();
        let close_callback = self
            .close_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        tracing::debug!(outstanding = pending.len(), "channel closed");

        for (request_id, request) in pending {
            // A lent callback is failed by the sent notification holding it.
            if request.callback.is_none() {
                continue;
            }
            deliver(
                context.as_ref(),
                Box::new(move || {
                    tracing::trace!(request_id, "failing request on close");
                    Self::fail(
                        request,
                        ChannelError::ConnectionUnavailable(UnavailableReason::Closed),
                    );
                }),
            );
        }

        if let Some(close_callback) = close_callback {
            deliver(context.as_ref(), Box::new(move || close_callback.channel_closed()));
        }
    }

    fn fail(request: PendingRequest, error: ChannelError) {
        let span = request.span();
        if let Some(callback) = request.callback {
            let _entered = span.enter();
            callback.on_response_error(error);
        }
    }

    fn sendable(status: &ChannelStatus) -> Result<ExecutionContextRef, UnavailableReason> {
        if status.state.is_closed() {
            return Err(UnavailableReason::Closed);
        }
        status
            .context
            .clone()
            .ok_or(UnavailableReason::NoExecutionContext)
    }

    fn lock_status(&self) -> MutexGuard<'_, ChannelStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CloseObserver for ChannelShared {
    fn on_connection_closed(&self) {
        self.close();
    }
}

/// Runs `task` on `context`, or inline when the channel has none.
pub(crate) fn deliver(context: Option<&ExecutionContextRef>, task: Task) {
    match context {
        Some(context) => {
            if !context.run_in_context(task) {
                tracing::error!("execution context shut down; dropping callback");
            }
        }
        None => task(),
    }
}
