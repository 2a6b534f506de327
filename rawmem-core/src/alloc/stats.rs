//! ## rawmem-core::alloc::stats
//! **Allocation statistics and tracking**
//!
//! Counters an [`Allocator`](super::Allocator) bumps when a collector is
//! attached. Relaxed atomics: the numbers are for reporting, not for
//! synchronising anything.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Allocation counters shared by every clone of an allocator.
#[derive(Debug, Default)]
pub struct AllocStats {
    allocations: AtomicU64,
    zeroed_allocations: AtomicU64,
    frees: AtomicU64,
    bytes_requested: AtomicU64,
    failed_allocations: AtomicU64,
}

/// Point-in-time copy of [`AllocStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocStatsSnapshot {
    pub allocations: u64,
    pub zeroed_allocations: u64,
    pub frees: u64,
    pub bytes_requested: u64,
    pub failed_allocations: u64,
}

impl AllocStatsSnapshot {
    /// Successful allocations not yet matched by a free.
    pub fn outstanding(&self) -> u64 {
        (self.allocations + self.zeroed_allocations).saturating_sub(self.frees)
    }
}

impl AllocStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_allocation(&self, bytes: usize, zeroed: bool) {
        let counter = if zeroed {
            &self.zeroed_allocations
        } else {
            &self.allocations
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.bytes_requested
            .fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_failure(&self) {
        self.failed_allocations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_free(&self) {
        self.frees.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> AllocStatsSnapshot {
        AllocStatsSnapshot {
            allocations: self.allocations.load(Ordering::Relaxed),
            zeroed_allocations: self.zeroed_allocations.load(Ordering::Relaxed),
            frees: self.frees.load(Ordering::Relaxed),
            bytes_requested: self.bytes_requested.load(Ordering::Relaxed),
            failed_allocations: self.failed_allocations.load(Ordering::Relaxed),
        }
    }
}
