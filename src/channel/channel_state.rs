/// Lifecycle of a channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChannelState {
    /// Built without an execution context; nothing can be sent yet.
    Constructed,
    /// An execution context is attached and requests may be sent.
    Active,
    /// The execution context was detached; sends fail until one is attached.
    Detached,
    /// Terminal. The connection closed or was closed through the channel.
    Closed,
}

impl ChannelState {
    pub fn is_closed(self) -> bool {
        self == ChannelState::Closed
    }
}
