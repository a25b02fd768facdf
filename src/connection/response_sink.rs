use super::InboundResponse;
use crate::error::ChannelError;

/// Completion side of a request, as seen by the connection.
///
/// May be invoked from any thread; the channel takes care of moving the
/// notification onto its own execution context.
pub trait ResponseSink: Send {
    fn on_request_sent(&mut self);

    fn on_response(self: Box<Self>, response: InboundResponse);

    fn on_error(self: Box<Self>, error: ChannelError);
}
