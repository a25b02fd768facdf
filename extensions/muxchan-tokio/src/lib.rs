mod constants;
mod loopback_connection;
mod tokio_event_base;

pub use constants::*;
pub use loopback_connection::{LoopbackConfig, LoopbackConnection, LoopbackRequest};
pub use tokio_event_base::TokioEventBase;
