use super::HeaderMap;
use once_cell::sync::Lazy;
use std::sync::{PoisonError, RwLock};

/// Process-wide default headers, applied to every request of every channel
/// underneath that channel's own persistent headers.
static GLOBAL_DEFAULT_HEADERS: Lazy<RwLock<HeaderMap>> =
    Lazy::new(|| RwLock::new(HeaderMap::new()));

pub fn set_global_default_header(key: impl Into<String>, value: impl Into<String>) {
    GLOBAL_DEFAULT_HEADERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key.into(), value.into());
}

pub fn remove_global_default_header(key: &str) -> Option<String> {
    GLOBAL_DEFAULT_HEADERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(key)
}

pub fn clear_global_default_headers() {
    GLOBAL_DEFAULT_HEADERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

/// Snapshot of the current process-wide defaults.
pub fn global_default_headers() -> HeaderMap {
    GLOBAL_DEFAULT_HEADERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
