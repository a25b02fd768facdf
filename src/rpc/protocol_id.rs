use std::fmt;

/// Identifier of the payload encoding negotiated for a channel.
///
/// The encoding itself is opaque to this crate; the id is only carried along
/// with each request so the connection (and the peer) can pick a codec.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProtocolId(pub u16);

impl ProtocolId {
    pub const BINARY: ProtocolId = ProtocolId(0);
    pub const JSON: ProtocolId = ProtocolId(1);
    pub const COMPACT: ProtocolId = ProtocolId(2);
}

impl Default for ProtocolId {
    fn default() -> Self {
        ProtocolId::COMPACT
    }
}

impl From<u16> for ProtocolId {
    fn from(value: u16) -> Self {
        ProtocolId(value)
    }
}

impl From<ProtocolId> for u16 {
    fn from(value: ProtocolId) -> Self {
        value.0
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ProtocolId::BINARY => write!(f, "binary"),
            ProtocolId::JSON => write!(f, "json"),
            ProtocolId::COMPACT => write!(f, "compact"),
            ProtocolId(other) => write!(f, "protocol({other})"),
        }
    }
}
