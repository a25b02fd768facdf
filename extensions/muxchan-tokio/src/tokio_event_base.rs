use crate::constants::EVENT_BASE_THREAD_PREFIX;
use muxchan::execution::{ExecutionContext, ExecutionContextRef, Task};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

/// Execution context backed by a dedicated thread running a current-thread
/// Tokio runtime.
///
/// Marshaled tasks and futures spawned on [`runtime_handle`](Self::runtime_handle)
/// share that one thread, so both observe single-threaded ordering.
pub struct TokioEventBase {
    inner: Arc<EventBaseInner>,
    runtime_handle: Handle,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

struct EventBaseInner {
    tx: mpsc::UnboundedSender<Task>,
    thread_id: ThreadId,
}

impl TokioEventBase {
    pub fn new(name: &str) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let runtime_handle = runtime.handle().clone();

        let (tx, mut rx) = mpsc::unbounded_channel::<Task>();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name(format!("{EVENT_BASE_THREAD_PREFIX}-{name}"))
            .spawn(move || {
                runtime.block_on(async move {
                    loop {
                        tokio::select! {
                            task = rx.recv() => match task {
                                Some(task) => task(),
                                None => break,
                            },
                            _ = &mut shutdown_rx => break,
                        }
                    }

                    // Whatever was queued before shutdown still runs.
                    while let Ok(task) = rx.try_recv() {
                        task();
                    }
                });
            })?;

        tracing::debug!(name, "event base started");

        Ok(Self {
            inner: Arc::new(EventBaseInner {
                tx,
                thread_id: thread.thread().id(),
            }),
            runtime_handle,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    pub fn context(&self) -> ExecutionContextRef {
        self.inner.clone()
    }

    /// Handle of the runtime driving this event base, for spawning futures
    /// that must run on its thread.
    pub fn runtime_handle(&self) -> &Handle {
        &self.runtime_handle
    }

    pub fn thread_id(&self) -> ThreadId {
        self.inner.thread_id
    }
}

impl Drop for TokioEventBase {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }

        if let Some(thread) = self.thread.take() {
            // Joining from the loop thread itself would never return.
            if thread::current().id() != self.inner.thread_id && thread.join().is_err() {
                tracing::error!("event base thread panicked");
            }
        }
    }
}

impl ExecutionContext for EventBaseInner {
    fn run_in_context(&self, task: Task) -> bool {
        self.tx.send(task).is_ok()
    }

    fn is_in_context_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }
}
