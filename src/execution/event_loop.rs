use super::{ExecutionContext, ExecutionContextRef, Task};
use futures::StreamExt;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// Runtime-agnostic execution context driven by its owner.
///
/// Tasks queue up until the owner calls [`run_pending`](Self::run_pending),
/// [`run_next`](Self::run_next) or [`block_until`](Self::block_until); the
/// thread doing so becomes the loop thread.
///
/// The loop keeps a handle of its own, so its queue never closes while the
/// loop exists.
pub struct EventLoop {
    handle: Arc<EventLoopHandle>,
    rx: UnboundedReceiver<Task>,
}

/// Shareable submission side of an [`EventLoop`].
pub struct EventLoopHandle {
    tx: UnboundedSender<Task>,
    loop_thread: Mutex<Option<ThreadId>>,
}

impl EventLoop {
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<Task>();

        Self {
            handle: Arc::new(EventLoopHandle {
                tx,
                loop_thread: Mutex::new(None),
            }),
            rx,
        }
    }

    pub fn handle(&self) -> Arc<EventLoopHandle> {
        self.handle.clone()
    }

    pub fn context(&self) -> ExecutionContextRef {
        self.handle.clone()
    }

    /// Runs every task queued so far without waiting for new ones.
    /// Returns the number of tasks run.
    pub fn run_pending(&mut self) -> usize {
        self.claim_current_thread();

        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Waits for the next task and runs it.
    pub async fn run_next(&mut self) {
        self.claim_current_thread();

        if let Some(task) = self.rx.next().await {
            task();
        }
    }

    /// Blocks the calling thread, running tasks as they arrive, until `done`
    /// returns `true`. `done` is checked after every task; if it never turns
    /// `true` this does not return.
    pub fn block_until<F>(&mut self, mut done: F)
    where
        F: FnMut() -> bool,
    {
        futures::executor::block_on(async {
            while !done() {
                self.run_next().await;
            }
        });
    }

    fn claim_current_thread(&self) {
        *self
            .handle
            .loop_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(thread::current().id());
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext for EventLoopHandle {
    fn run_in_context(&self, task: Task) -> bool {
        self.tx.unbounded_send(task).is_ok()
    }

    fn is_in_context_thread(&self) -> bool {
        *self
            .loop_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            == Some(thread::current().id())
    }
}
