use super::channel_shared::{ChannelShared, deliver};
use crate::connection::{InboundResponse, ResponseSink};
use crate::error::{ChannelError, UnavailableReason};
use crate::execution::ExecutionContextRef;
use crate::rpc::RequestCallback;
use std::sync::Arc;

/// Sink for two-way requests. Every notification is moved onto the channel's
/// execution context before the pending entry is touched.
pub(crate) struct ChannelResponseSink {
    request_id: u32,
    shared: Arc<ChannelShared>,
    context: ExecutionContextRef,
    finished: bool,
}

impl ChannelResponseSink {
    pub fn new(request_id: u32, shared: Arc<ChannelShared>, context: ExecutionContextRef) -> Self {
        Self {
            request_id,
            shared,
            context,
            finished: false,
        }
    }

    fn finish(&mut self, outcome: Result<InboundResponse, ChannelError>) {
        self.finished = true;

        let shared = self.shared.clone();
        let request_id = self.request_id;
        deliver(
            Some(&self.context),
            Box::new(move || shared.complete(request_id, outcome)),
        );
    }
}

impl ResponseSink for ChannelResponseSink {
    fn on_request_sent(&mut self) {
        let shared = self.shared.clone();
        let request_id = self.request_id;
        deliver(
            Some(&self.context),
            Box::new(move || shared.mark_sent(request_id)),
        );
    }

    fn on_response(mut self: Box<Self>, response: InboundResponse) {
        self.finish(Ok(response));
    }

    fn on_error(mut self: Box<Self>, error: ChannelError) {
        self.finish(Err(error));
    }
}

impl Drop for ChannelResponseSink {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                request_id = self.request_id,
                "connection dropped a request without completing it"
            );
            self.finish(Err(ChannelError::ConnectionUnavailable(
                UnavailableReason::Closed,
            )));
        }
    }
}

/// Sink for one-way requests. Forwards the send notification (or a send
/// failure) and never delivers a response.
pub(crate) struct OnewayResponseSink {
    request_id: u32,
    callback: Option<Box<dyn RequestCallback>>,
    context: ExecutionContextRef,
}

impl OnewayResponseSink {
    pub fn new(
        request_id: u32,
        callback: Box<dyn RequestCallback>,
        context: ExecutionContextRef,
    ) -> Self {
        Self {
            request_id,
            callback: Some(callback),
            context,
        }
    }
}

impl ResponseSink for OnewayResponseSink {
    fn on_request_sent(&mut self) {
        if let Some(mut callback) = self.callback.take() {
            deliver(
                Some(&self.context),
                Box::new(move || callback.on_request_sent()),
            );
        }
    }

    fn on_response(self: Box<Self>, _response: InboundResponse) {
        tracing::warn!(
            request_id = self.request_id,
            "discarding response to a one-way request"
        );
    }

    fn on_error(mut self: Box<Self>, error: ChannelError) {
        if let Some(callback) = self.callback.take() {
            deliver(
                Some(&self.context),
                Box::new(move || callback.on_response_error(error)),
            );
        }
    }
}
