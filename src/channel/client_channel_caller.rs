use super::ClientChannel;
use crate::error::{ChannelError, UnavailableReason};
use crate::header::RequestHeader;
use crate::rpc::{
    ClientResponse, ContextStack, RequestCallback, RpcOptions, request_callback,
};
use bytes::Bytes;
use futures::channel::oneshot;

/// Future-based calls on top of any [`ClientChannel`].
///
/// The returned futures resolve once the channel's execution context has run
/// the callback, so that context must be driven for them to complete.
#[async_trait::async_trait]
pub trait ClientChannelCaller: ClientChannel {
    /// Sends a two-way request and waits for its outcome.
    async fn call(
        &self,
        options: RpcOptions,
        context: Option<ContextStack>,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> Result<ClientResponse, ChannelError> {
        let (tx, rx) = oneshot::channel();

        self.send_request(
            &options,
            request_callback(move |outcome| {
                let _ = tx.send(outcome);
            }),
            context,
            payload,
            header,
        );

        rx.await.unwrap_or(Err(ChannelError::ConnectionUnavailable(
            UnavailableReason::Closed,
        )))
    }

    /// Sends a one-way request and waits until the connection wrote it.
    async fn call_oneway(
        &self,
        options: RpcOptions,
        payload: Bytes,
        header: Option<RequestHeader>,
    ) -> Result<(), ChannelError> {
        let (tx, rx) = oneshot::channel();

        self.send_oneway_request(
            &options,
            Box::new(OnewaySentNotifier { tx: Some(tx) }),
            None,
            payload,
            header,
        );

        rx.await.unwrap_or(Err(ChannelError::ConnectionUnavailable(
            UnavailableReason::Closed,
        )))
    }
}

impl<T: ClientChannel> ClientChannelCaller for T {}

struct OnewaySentNotifier {
    tx: Option<oneshot::Sender<Result<(), ChannelError>>>,
}

impl RequestCallback for OnewaySentNotifier {
    fn on_request_sent(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Ok(()));
        }
    }

    fn on_response(mut self: Box<Self>, _response: ClientResponse) {
        self.on_request_sent();
    }

    fn on_response_error(mut self: Box<Self>, error: ChannelError) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Err(error));
        }
    }
}
