//! Request identity tracking for screens that issue async work
//!
//! Each issued request gets a fresh id; only the most recently issued id
//! may deliver its result. A response arriving for any other id is stale
//! and must be dropped by the caller.

pub type RequestId = u64;

#[derive(Debug, Default)]
pub struct RequestTracker {
    next: RequestId,
    active: Option<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request id, superseding any in-flight request
    pub fn begin(&mut self) -> RequestId {
        self.next += 1;
        self.active = Some(self.next);
        self.next
    }

    /// Try to settle the given request. Returns true only when `id` is the
    /// latest issued request, clearing it; stale or unknown ids return
    /// false and leave the tracker untouched.
    pub fn finish(&mut self, id: RequestId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Drop the in-flight request, if any. Its eventual result becomes stale.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn in_flight(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<RequestId> {
        self.active
    }
}
