//! Request-dispatch channel for RPC clients.
//!
//! An [`RpcClientChannel`](channel::RpcClientChannel) forwards requests to a
//! shared [`ClientConnection`](connection::ClientConnection) and marshals every
//! completion callback onto the execution context the channel was given, which
//! may differ from the thread the connection performs its I/O on.

pub mod channel;
pub mod connection;
pub mod constants;
pub mod error;
pub mod execution;
pub mod header;
pub mod rpc;

pub use channel::{
    ChannelState, ClientChannel, ClientChannelCaller, CloseCallback, RpcClientChannel,
};
pub use error::{ChannelError, DetachBlocker, UnavailableReason};
