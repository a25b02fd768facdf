use crate::rpc::{ContextStack, ProtocolId, RequestCallback};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::Span;

/// A two-way request whose callback has not fired yet.
pub(crate) struct PendingRequest {
    /// `None` while the callback is lent out for its sent notification.
    pub callback: Option<Box<dyn RequestCallback>>,
    pub context: Option<ContextStack>,
    pub protocol_id: ProtocolId,
    pub is_security_active: bool,
}

impl PendingRequest {
    pub fn new(
        callback: Box<dyn RequestCallback>,
        context: Option<ContextStack>,
        protocol_id: ProtocolId,
        is_security_active: bool,
    ) -> Self {
        Self {
            callback: Some(callback),
            context,
            protocol_id,
            is_security_active,
        }
    }

    /// Span the callback runs in.
    pub fn span(&self) -> Span {
        self.context
            .as_ref()
            .map(|context| context.span().clone())
            .unwrap_or_else(Span::none)
    }
}

/// In-flight requests of one channel, keyed by request id.
///
/// Whoever removes an entry owns its callback, which is what makes delivery
/// exactly-once when a response and a close race each other. An entry whose
/// callback is lent out stays registered and counted.
#[derive(Default)]
pub(crate) struct PendingRequests {
    entries: Mutex<HashMap<u32, PendingRequest>>,
}

impl PendingRequests {
    pub fn insert(&self, request_id: u32, request: PendingRequest) {
        self.lock().insert(request_id, request);
    }

    pub fn take(&self, request_id: u32) -> Option<PendingRequest> {
        self.lock().remove(&request_id)
    }

    /// Borrows the callback of `request_id`, leaving the entry in place.
    pub fn lend_callback(&self, request_id: u32) -> Option<(Box<dyn RequestCallback>, Span)> {
        let mut entries = self.lock();
        let request = entries.get_mut(&request_id)?;
        let callback = request.callback.take()?;
        Some((callback, request.span()))
    }

    /// Puts a lent callback back. Hands it back to the caller if the entry
    /// was removed in the meantime.
    pub fn return_callback(
        &self,
        request_id: u32,
        callback: Box<dyn RequestCallback>,
    ) -> Result<(), Box<dyn RequestCallback>> {
        match self.lock().get_mut(&request_id) {
            Some(request) => {
                request.callback = Some(callback);
                Ok(())
            }
            None => Err(callback),
        }
    }

    pub fn drain(&self) -> Vec<(u32, PendingRequest)> {
        self.lock().drain().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u32, PendingRequest>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
