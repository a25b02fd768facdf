use super::{ChatMessage, ChatMethod, invalid_data};
use bitcode::{Decode, Encode};
use std::io;

#[derive(Encode, Decode, PartialEq, Debug)]
struct SendMessageResponse {
    pub accepted: bool,
}

pub struct SendMessage;

impl ChatMethod for SendMessage {
    const METHOD_NAME: &'static str = "sendMessage";

    type Input = ChatMessage;
    type Output = bool;

    fn encode_request(message: Self::Input) -> Vec<u8> {
        bitcode::encode(&message)
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error> {
        bitcode::decode::<ChatMessage>(bytes).map_err(invalid_data)
    }

    fn encode_response(accepted: Self::Output) -> Vec<u8> {
        bitcode::encode(&SendMessageResponse { accepted })
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error> {
        let raw = bitcode::decode::<SendMessageResponse>(bytes).map_err(invalid_data)?;

        Ok(raw.accepted)
    }
}
