use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Framing family spoken by a connection. Reported by the connection, never
/// chosen by the channel.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum ClientType {
    Header = 0,
    Framed = 1,
    Unframed = 2,
    HttpServer = 3,
    HttpClient = 4,
    FramedCompact = 5,
}
