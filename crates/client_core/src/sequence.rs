//! Request bookkeeping shared by the controllers: monotonically increasing
//! sequence numbers and a busy flag held through RAII guards.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestSeq {
        self.issued += 1;
        RequestSeq(self.issued)
    }

    pub fn latest(&self) -> Option<RequestSeq> {
        (self.issued > 0).then_some(RequestSeq(self.issued))
    }

    pub fn is_latest(&self, seq: RequestSeq) -> bool {
        seq.0 == self.issued
    }

    /// Takes back `seq` if nothing newer was issued after it. Returns whether
    /// the counter moved.
    pub fn retract(&mut self, seq: RequestSeq) -> bool {
        if seq.0 != 0 && self.is_latest(seq) {
            self.issued -= 1;
            true
        } else {
            false
        }
    }
}

/// Set while at least one [`BusyGuard`] is alive.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    outstanding: Arc<AtomicUsize>,
}

impl BusyFlag {
    pub fn acquire(&self) -> BusyGuard {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    pub fn is_set(&self) -> bool {
        self.outstanding() > 0
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    outstanding: Arc<AtomicUsize>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

/// What happened to component state when a response came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Superseded,
}

impl Completion {
    pub fn is_applied(self) -> bool {
        self == Completion::Applied
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;
