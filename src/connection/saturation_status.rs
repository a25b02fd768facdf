/// Load indicator reported by a connection. A `max_pending` of zero means
/// the connection has no limit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SaturationStatus {
    pub pending: usize,
    pub max_pending: usize,
}

impl SaturationStatus {
    pub fn new(pending: usize, max_pending: usize) -> Self {
        Self {
            pending,
            max_pending,
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.max_pending != 0 && self.pending >= self.max_pending
    }
}
