/// Request id handed back by one-way sends. No response ever correlates with it.
pub const ONEWAY_REQUEST_ID: u32 = u32::MAX;

/// First request id issued by a freshly constructed channel.
pub const FIRST_REQUEST_ID: u32 = 1;

/// Reserved header carrying the per-call timeout, in whole milliseconds.
pub const CLIENT_TIMEOUT_HEADER: &str = "client_timeout";

/// Reserved header carrying the numeric `RpcPriority` of a call.
pub const PRIORITY_HEADER: &str = "priority";
