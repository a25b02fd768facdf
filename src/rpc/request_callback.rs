use crate::error::ChannelError;
use crate::rpc::ClientResponse;

/// Receives the outcome of a single request.
///
/// Exactly one of `on_response` / `on_response_error` is invoked per two-way
/// request, always on the execution context of the channel that sent it.
/// One-way requests only ever see `on_request_sent`, or `on_response_error`
/// if the send itself failed.
pub trait RequestCallback: Send {
    /// The connection finished writing the request.
    fn on_request_sent(&mut self) {}

    fn on_response(self: Box<Self>, response: ClientResponse);

    fn on_response_error(self: Box<Self>, error: ChannelError);
}

/// Adapts a closure over the call result into a [`RequestCallback`].
pub struct FnRequestCallback<F> {
    on_complete: F,
}

impl<F> RequestCallback for FnRequestCallback<F>
where
    F: FnOnce(Result<ClientResponse, ChannelError>) + Send,
{
    fn on_response(self: Box<Self>, response: ClientResponse) {
        (self.on_complete)(Ok(response))
    }

    fn on_response_error(self: Box<Self>, error: ChannelError) {
        (self.on_complete)(Err(error))
    }
}

pub fn request_callback<F>(on_complete: F) -> Box<dyn RequestCallback>
where
    F: FnOnce(Result<ClientResponse, ChannelError>) + Send + 'static,
{
    Box::new(FnRequestCallback { on_complete })
}
