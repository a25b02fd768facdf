use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Interaction pattern of an outgoing request.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum RpcKind {
    SingleRequestSingleResponse = 0,
    SingleRequestNoResponse = 1,
}

impl RpcKind {
    pub fn expects_response(self) -> bool {
        self == RpcKind::SingleRequestSingleResponse
    }
}
