use example_muxchan_chat_app::{ChatMessage, ChatRoom, ChatRoomClient};
use muxchan::rpc::ProtocolId;
use muxchan::{ClientChannel, RpcClientChannel};
use muxchan_tokio::{LoopbackConfig, LoopbackConnection, LoopbackRequest, TokioEventBase};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_evb = TokioEventBase::new("chat-server")?;
    let client_evb = TokioEventBase::new("chat-client")?;

    let room = ChatRoom::new();
    let connection = LoopbackConnection::new(&server_evb, LoopbackConfig::default(), {
        let room = room.clone();
        move |request: LoopbackRequest| {
            let room = room.clone();
            async move { room.handle(request) }
        }
    });

    let mut channel = RpcClientChannel::new(connection, client_evb.context());
    channel.set_protocol_id(ProtocolId::COMPACT);
    channel.set_timeout(Duration::from_millis(5000));

    let client = ChatRoomClient::new(channel);

    let sender = std::env::var("USER").unwrap_or_else(|_| "anonymous".to_string());

    match run_tutorial(&client, sender).await {
        Ok(messages) => {
            for entry in messages {
                tracing::info!("Message: {} Sender: {}", entry.message, entry.sender);
            }
        }
        Err(error) => tracing::error!("Request failed: {error}"),
    }

    client.channel().close_now();

    Ok(())
}

async fn run_tutorial(
    client: &ChatRoomClient<RpcClientChannel>,
    sender: String,
) -> io::Result<Vec<ChatMessage>> {
    client
        .send_message(ChatMessage {
            message: "Tutorial!".to_string(),
            sender,
        })
        .await?;

    client.get_messages(0).await
}
