//! Hash table statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by [`ExtendibleHashTable`](super::ExtendibleHashTable).
///
/// Relaxed atomics; read them through [`HashTableStats::snapshot`].
#[derive(Debug, Default)]
pub struct HashTableStats {
    /// `find` / `contains` calls.
    pub lookups: AtomicU64,
    /// Lookups that found their key.
    pub hits: AtomicU64,
    /// Inserts of a new key.
    pub inserts: AtomicU64,
    /// Inserts that overwrote an existing key.
    pub updates: AtomicU64,
    /// Successful removals.
    pub removals: AtomicU64,
    /// Bucket splits.
    pub splits: AtomicU64,
    /// Directory doublings (global depth increments).
    pub doublings: AtomicU64,
}

impl HashTableStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        if n > 0 {
            counter.fetch_add(n, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> HashTableStatsSnapshot {
        HashTableStatsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            doublings: self.doublings.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`HashTableStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashTableStatsSnapshot {
    pub lookups: u64,
    pub hits: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removals: u64,
    pub splits: u64,
    pub doublings: u64,
}

impl HashTableStatsSnapshot {
    /// Fraction of lookups that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

impl fmt::Display for HashTableStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HashTableStats {{ lookups: {}, hit_rate: {:.2}%, inserts: {}, splits: {}, doublings: {} }}",
            self.lookups,
            self.hit_rate() * 100.0,
            self.inserts,
            self.splits,
            self.doublings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_zero() {
        let stats = HashTableStats::new();
        HashTableStats::add(&stats.splits, 0);
        HashTableStats::add(&stats.splits, 3);
        assert_eq!(stats.snapshot().splits, 3);
    }

    #[test]
    fn test_hit_rate() {
        let snap = HashTableStatsSnapshot {
            lookups: 4,
            hits: 3,
            ..Default::default()
        };
        assert_eq!(snap.hit_rate(), 0.75);
        assert_eq!(HashTableStatsSnapshot::default().hit_rate(), 0.0);
        assert!(snap.to_string().contains("75.00%"));
    }
}
