use super::{ChatMessage, ChatMethod, invalid_data};
use bitcode::{Decode, Encode};
use std::io;

#[derive(Encode, Decode, PartialEq, Debug)]
struct GetMessagesRequest {
    /// Index of the first message to return.
    pub since: u64,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct GetMessagesResponse {
    pub messages: Vec<ChatMessage>,
}

pub struct GetMessages;

impl ChatMethod for GetMessages {
    const METHOD_NAME: &'static str = "getMessages";

    type Input = u64;
    type Output = Vec<ChatMessage>;

    fn encode_request(since: Self::Input) -> Vec<u8> {
        bitcode::encode(&GetMessagesRequest { since })
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error> {
        let raw = bitcode::decode::<GetMessagesRequest>(bytes).map_err(invalid_data)?;

        Ok(raw.since)
    }

    fn encode_response(messages: Self::Output) -> Vec<u8> {
        bitcode::encode(&GetMessagesResponse { messages })
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error> {
        let raw = bitcode::decode::<GetMessagesResponse>(bytes).map_err(invalid_data)?;

        Ok(raw.messages)
    }
}
