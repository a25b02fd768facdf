mod event_loop;
mod execution_context;

pub use event_loop::{EventLoop, EventLoopHandle};
pub use execution_context::{ExecutionContext, ExecutionContextRef, Task, same_context};
