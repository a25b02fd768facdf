mod chat_room;
mod client;
pub mod service_definition;

pub use chat_room::ChatRoom;
pub use client::ChatRoomClient;
pub use service_definition::{ChatMessage, GetMessages, SendMessage};
