use std::collections::HashMap;
use tracing::Span;

/// Context carried from the call site to the completion callback.
///
/// The span current at construction is re-entered while the callback runs,
/// so log lines emitted by the callback stay attached to the originating
/// request even though they execute on another thread.
#[derive(Debug, Clone)]
pub struct ContextStack {
    method_name: String,
    span: Span,
    baggage: HashMap<String, String>,
}

impl ContextStack {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            span: Span::current(),
            baggage: HashMap::new(),
        }
    }

    pub fn with_baggage(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.baggage.insert(key.into(), value.into());
        self
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn baggage(&self, key: &str) -> Option<&str> {
        self.baggage.get(key).map(String::as_str)
    }
}
