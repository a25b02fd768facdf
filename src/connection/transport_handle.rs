use std::net::SocketAddr;

/// Minimal view of the transport underneath a connection.
pub trait TransportHandle: Send + Sync {
    fn peer_address(&self) -> Option<SocketAddr>;

    fn local_address(&self) -> Option<SocketAddr>;

    fn is_open(&self) -> bool;
}
