use crate::service_definition::{ChatMessage, ChatMethod, GetMessages, METHOD_HEADER, SendMessage};
use muxchan::connection::InboundResponse;
use muxchan_tokio::LoopbackRequest;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory chat room served behind a loopback connection.
#[derive(Default, Clone)]
pub struct ChatRoom {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl ChatRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a request on its method header and encodes the reply.
    pub fn handle(&self, request: LoopbackRequest) -> io::Result<InboundResponse> {
        let method = request
            .headers
            .get(METHOD_HEADER)
            .map(String::as_str)
            .unwrap_or_default();

        let payload = match method {
            SendMessage::METHOD_NAME => {
                let message = SendMessage::decode_request(&request.payload)?;
                tracing::info!(sender = %message.sender, "message received");
                self.lock_messages().push(message);
                SendMessage::encode_response(true)
            }
            GetMessages::METHOD_NAME => {
                let since = GetMessages::decode_request(&request.payload)?;
                let messages = self
                    .lock_messages()
                    .iter()
                    .skip(usize::try_from(since).unwrap_or(usize::MAX))
                    .cloned()
                    .collect();
                GetMessages::encode_response(messages)
            }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("unknown chat method: {other:?}"),
                ));
            }
        };

        Ok(InboundResponse::new(payload))
    }

    fn lock_messages(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
