//! Cache statistics tracking and reporting

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the cache counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Reads that found an entry past its deadline (also counted as misses)
    pub expired: u64,
    /// Reads that found an entry that would not decode (also counted as misses)
    pub corrupt: u64,
    pub writes: u64,
    /// Entries removed by prefix invalidation or clearing
    pub invalidated: u64,
    /// Write-backs dropped because their key was invalidated in flight
    pub stale: u64,
    /// Entries currently held, including not-yet-collected expired ones
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage of all lookups
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Lock-free counters behind [`CacheStats`]
#[derive(Debug, Default)]
pub(crate) struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    corrupt: AtomicU64,
    writes: AtomicU64,
    invalidated: AtomicU64,
    stale: AtomicU64,
}

impl Counters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
        self.record_miss();
    }

    pub(crate) fn record_corrupt(&self) {
        self.corrupt.fetch_add(1, Ordering::Relaxed);
        self.record_miss();
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalidated(&self, removed: usize) {
        self.invalidated.fetch_add(removed as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_stale(&self) {
        self.stale.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            corrupt: self.corrupt.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            invalidated: self.invalidated.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            entries,
        }
    }
}
