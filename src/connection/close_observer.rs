/// Notified when a connection transitions to closed.
pub trait CloseObserver: Send + Sync {
    fn on_connection_closed(&self);
}
