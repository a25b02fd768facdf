mod client_response;
mod client_type;
mod context_stack;
mod protocol_id;
mod request_callback;
mod rpc_kind;
mod rpc_options;
mod rpc_priority;

pub use client_response::ClientResponse;
pub use client_type::ClientType;
pub use context_stack::ContextStack;
pub use protocol_id::ProtocolId;
pub use request_callback::{FnRequestCallback, RequestCallback, request_callback};
pub use rpc_kind::RpcKind;
pub use rpc_options::RpcOptions;
pub use rpc_priority::RpcPriority;
