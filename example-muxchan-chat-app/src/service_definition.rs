mod get_messages;
mod send_message;

pub use get_messages::GetMessages;
pub use send_message::SendMessage;

use bitcode::{Decode, Encode};
use std::io;

/// Header carrying the name of the method a request targets.
pub const METHOD_HEADER: &str = "method";

#[derive(Encode, Decode, PartialEq, Eq, Debug, Clone)]
pub struct ChatMessage {
    pub message: String,
    pub sender: String,
}

/// A chat-room method with its bitcode request and response encodings.
pub trait ChatMethod {
    const METHOD_NAME: &'static str;

    type Input;
    type Output;

    fn encode_request(input: Self::Input) -> Vec<u8>;

    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error>;

    fn encode_response(output: Self::Output) -> Vec<u8>;

    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error>;
}

pub(crate) fn invalid_data(error: bitcode::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, error)
}
