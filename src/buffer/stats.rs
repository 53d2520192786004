//! Replacer statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by the LRU-K replacer.
///
/// Updated with `Ordering::Relaxed`: each counter only needs to be atomic on
/// its own, and readers take a [`ReplacerStatsSnapshot`] for reporting.
///
/// # Example
/// ```
/// use bufcore::buffer::replacer::LruKReplacer;
/// use bufcore::FrameId;
///
/// let replacer = LruKReplacer::new(4, 2);
/// replacer.record_access(FrameId::new(1));
/// replacer.record_access(FrameId::new(99)); // out of range, ignored
///
/// let snap = replacer.stats().snapshot();
/// assert_eq!(snap.accesses, 1);
/// assert_eq!(snap.ignored, 1);
/// ```
#[derive(Debug, Default)]
pub struct ReplacerStats {
    /// Accesses recorded against a valid frame.
    pub accesses: AtomicU64,

    /// Frames handed out by `evict`.
    pub evictions: AtomicU64,

    /// Frames dropped through `remove`.
    pub removals: AtomicU64,

    /// Calls that were no-ops: out-of-range ids, untracked frames, or
    /// removal of a pinned frame.
    pub ignored: AtomicU64,
}

impl ReplacerStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values.
    pub fn snapshot(&self) -> ReplacerStatsSnapshot {
        ReplacerStatsSnapshot {
            accesses: self.accesses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.accesses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.removals.store(0, Ordering::Relaxed);
        self.ignored.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`ReplacerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplacerStatsSnapshot {
    pub accesses: u64,
    pub evictions: u64,
    pub removals: u64,
    pub ignored: u64,
}

impl fmt::Display for ReplacerStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReplacerStats {{ accesses: {}, evictions: {}, removals: {}, ignored: {} }}",
            self.accesses, self.evictions, self.removals, self.ignored
        )
    }
}
