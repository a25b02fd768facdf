use crate::service_definition::{ChatMessage, ChatMethod, GetMessages, METHOD_HEADER, SendMessage};
use bytes::Bytes;
use muxchan::header::RequestHeader;
use muxchan::rpc::RpcOptions;
use muxchan::{ChannelError, ClientChannelCaller};
use std::io;

/// Typed chat-room calls over any client channel.
pub struct ChatRoomClient<C> {
    channel: C,
}

impl<C: ClientChannelCaller> ChatRoomClient<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub async fn send_message(&self, message: ChatMessage) -> Result<bool, io::Error> {
        self.call::<SendMessage>(message).await
    }

    pub async fn get_messages(&self, since: u64) -> Result<Vec<ChatMessage>, io::Error> {
        self.call::<GetMessages>(since).await
    }

    async fn call<M: ChatMethod>(&self, input: M::Input) -> Result<M::Output, io::Error> {
        let header = RequestHeader::new().with_header(METHOD_HEADER, M::METHOD_NAME);

        let response = self
            .channel
            .call(
                RpcOptions::new(),
                None,
                Bytes::from(M::encode_request(input)),
                Some(header),
            )
            .await
            .map_err(into_io_error)?;

        M::decode_response(&response.payload)
    }
}

fn into_io_error(error: ChannelError) -> io::Error {
    match error {
        ChannelError::TransportFailure(error) => error,
        ChannelError::Timeout(_) => io::Error::new(io::ErrorKind::TimedOut, error),
        other => io::Error::other(other),
    }
}
