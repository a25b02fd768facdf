use super::HeaderMap;

/// Per-call header object handed to a send.
///
/// The write headers it carries are consumed by the send that receives it.
#[derive(Debug, Clone, Default)]
pub struct RequestHeader {
    write_headers: HeaderMap,
}

impl RequestHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.write_headers.insert(key.into(), value.into());
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.write_headers.get(key).map(String::as_str)
    }

    pub fn write_headers(&self) -> &HeaderMap {
        &self.write_headers
    }

    /// Moves the write headers out, leaving the header empty.
    pub fn take_write_headers(&mut self) -> HeaderMap {
        std::mem::take(&mut self.write_headers)
    }

    pub fn is_empty(&self) -> bool {
        self.write_headers.is_empty()
    }
}

impl From<HeaderMap> for RequestHeader {
    fn from(write_headers: HeaderMap) -> Self {
        Self { write_headers }
    }
}
