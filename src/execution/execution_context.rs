use std::sync::Arc;

/// Unit of work marshaled onto an execution context.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A single-threaded, cooperative scheduling domain.
///
/// Tasks submitted from any thread run on the context's own thread, in
/// submission order.
pub trait ExecutionContext: Send + Sync {
    /// Queues `task` to run on the context. Returns `false` if the context
    /// has shut down, in which case the task is dropped without running.
    fn run_in_context(&self, task: Task) -> bool;

    /// Whether the calling thread is the one draining this context.
    fn is_in_context_thread(&self) -> bool;
}

pub type ExecutionContextRef = Arc<dyn ExecutionContext>;

/// Identity comparison of two context handles.
pub fn same_context(a: &ExecutionContextRef, b: &ExecutionContextRef) -> bool {
    Arc::ptr_eq(a, b)
}
