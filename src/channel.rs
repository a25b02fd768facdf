mod channel_shared;
mod channel_state;
mod client_channel;
mod client_channel_caller;
mod close_callback;
mod pending_requests;
mod response_sinks;
mod rpc_client_channel;

pub use channel_state::ChannelState;
pub use client_channel::ClientChannel;
pub use client_channel_caller::ClientChannelCaller;
pub use close_callback::CloseCallback;
pub use rpc_client_channel::RpcClientChannel;
