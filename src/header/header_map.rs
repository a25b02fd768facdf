use crate::constants::{CLIENT_TIMEOUT_HEADER, PRIORITY_HEADER};
use crate::rpc::RpcOptions;
use std::collections::HashMap;

/// Header/metadata map sent alongside every request. Keys are unique and
/// their order carries no meaning.
pub type HeaderMap = HashMap<String, String>;

/// Merges `overrides` on top of `defaults`.
///
/// Every key of `overrides` replaces the entry with the same key in
/// `defaults`; keys present in only one of the maps are carried over as-is.
/// No normalization of header names takes place.
pub fn merge_headers(defaults: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();
    merge_into(&mut merged, overrides);
    merged
}

/// In-place form of [`merge_headers`]: entries of `src` overwrite `dst`.
pub fn merge_into(dst: &mut HeaderMap, src: &HeaderMap) {
    for (key, value) in src {
        dst.insert(key.clone(), value.clone());
    }
}

/// Writes the reserved headers derived from per-call options.
///
/// Only options that are actually set produce a header, so an empty
/// `RpcOptions` leaves `headers` untouched.
pub fn add_rpc_option_headers(headers: &mut HeaderMap, options: &RpcOptions) {
    if let Some(timeout) = options.timeout() {
        if !timeout.is_zero() {
            headers.insert(
                CLIENT_TIMEOUT_HEADER.to_string(),
                timeout.as_millis().to_string(),
            );
        }
    }

    if let Some(priority) = options.priority() {
        headers.insert(PRIORITY_HEADER.to_string(), u8::from(priority).to_string());
    }
}
