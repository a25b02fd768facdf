use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Scheduling hint forwarded to the server through the `priority` header.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum RpcPriority {
    HighImportant = 0,
    High = 1,
    Important = 2,
    Normal = 3,
    BestEffort = 4,
}
