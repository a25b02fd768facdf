use example_muxchan_chat_app::{ChatMessage, ChatRoom, ChatRoomClient};
use muxchan::RpcClientChannel;
use muxchan::header::RequestHeader;
use muxchan::rpc::RpcOptions;
use muxchan::{ChannelError, ClientChannelCaller};
use muxchan_tokio::{LoopbackConfig, LoopbackConnection, LoopbackRequest, TokioEventBase};
use std::sync::Arc;

fn chat_connection(server: &TokioEventBase, room: ChatRoom) -> Arc<LoopbackConnection> {
    LoopbackConnection::new(
        server,
        LoopbackConfig::default(),
        move |request: LoopbackRequest| {
            let room = room.clone();
            async move { room.handle(request) }
        },
    )
}

fn message(text: &str, sender: &str) -> ChatMessage {
    ChatMessage {
        message: text.to_string(),
        sender: sender.to_string(),
    }
}

#[tokio::test]
async fn test_messages_are_listed_in_order() {
    let server = TokioEventBase::new("server").unwrap();
    let client_evb = TokioEventBase::new("client").unwrap();
    let connection = chat_connection(&server, ChatRoom::new());
    let channel = RpcClientChannel::new(connection, client_evb.context());
    let client = ChatRoomClient::new(channel);

    assert!(client.send_message(message("hi", "ana")).await.unwrap());
    assert!(client.send_message(message("hey", "bo")).await.unwrap());

    assert_eq!(
        client.get_messages(0).await.unwrap(),
        vec![message("hi", "ana"), message("hey", "bo")]
    );
    assert_eq!(client.get_messages(1).await.unwrap(), vec![message("hey", "bo")]);
    assert!(client.get_messages(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_channels_on_one_connection_share_the_room() {
    let server = TokioEventBase::new("server").unwrap();
    let client_evb = TokioEventBase::new("client").unwrap();
    let connection = chat_connection(&server, ChatRoom::new());

    let writer = ChatRoomClient::new(RpcClientChannel::new(
        connection.clone(),
        client_evb.context(),
    ));
    let reader = ChatRoomClient::new(RpcClientChannel::with_connection_context(connection));

    writer.send_message(message("shared", "ana")).await.unwrap();
    assert_eq!(
        reader.get_messages(0).await.unwrap(),
        vec![message("shared", "ana")]
    );
}

#[tokio::test]
async fn test_unknown_method_is_transport_failure() {
    let server = TokioEventBase::new("server").unwrap();
    let client_evb = TokioEventBase::new("client").unwrap();
    let connection = chat_connection(&server, ChatRoom::new());
    let channel = RpcClientChannel::new(connection, client_evb.context());

    let result = channel
        .call(
            RpcOptions::new(),
            None,
            bytes::Bytes::new(),
            Some(RequestHeader::new().with_header("method", "deleteRoom")),
        )
        .await;

    match result {
        Err(ChannelError::TransportFailure(error)) => {
            assert_eq!(error.kind(), std::io::ErrorKind::Unsupported)
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
