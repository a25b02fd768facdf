mod client_connection;
mod close_observer;
mod outbound_request;
mod response_sink;
mod saturation_status;
mod transport_handle;

pub use client_connection::ClientConnection;
pub use close_observer::CloseObserver;
pub use outbound_request::{InboundResponse, OutboundRequest};
pub use response_sink::ResponseSink;
pub use saturation_status::SaturationStatus;
pub use transport_handle::TransportHandle;
