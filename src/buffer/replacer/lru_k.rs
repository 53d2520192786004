//! LRU-K replacement policy.
//!
//! Frames are split into two recency lists:
//!
//! ```text
//!   history  (< K accesses)   MRU ─▶ [f6] [f5] [f2] ─▶ LRU   ← evicted first
//!   cached   (>= K accesses)  MRU ─▶ [f1] [f4]      ─▶ LRU
//! ```
//!
//! A frame with fewer than K recorded accesses has an infinite backward
//! K-distance, so every evictable frame in `history` goes before any frame in
//! `cached`. Inside each list the least recently accessed evictable frame is
//! the victim. For `cached` this ranks by last access rather than by the age
//! of the K-th most recent access; that approximation is intentional.

use std::sync::atomic::AtomicU64;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::frame_list::{FrameList, Link};
use super::Replacer;
use crate::buffer::stats::ReplacerStats;
use crate::common::{Error, FrameId, ReplacerConfig, Result};

/// Which recency list a frame is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    History,
    Cached,
}

/// Per-frame bookkeeping. Its list position is the frame's own `Link`.
#[derive(Debug, Clone, Copy)]
struct FrameRecord {
    access_count: usize,
    evictable: bool,
    segment: Segment,
}

/// State behind the replacer's lock.
#[derive(Debug)]
struct LruKInner {
    capacity: usize,
    k: usize,
    /// Indexed by frame id. `None` means the frame is not tracked.
    records: Vec<Option<FrameRecord>>,
    links: Vec<Link>,
    history: FrameList,
    cached: FrameList,
    /// Number of records with `evictable == true`.
    curr_size: usize,
}

impl LruKInner {
    fn new(capacity: usize, k: usize) -> Self {
        // Ids are accepted up to and including `capacity`.
        let slots = capacity + 1;
        Self {
            capacity,
            k,
            records: vec![None; slots],
            links: vec![Link::default(); slots],
            history: FrameList::new(),
            cached: FrameList::new(),
            curr_size: 0,
        }
    }

    /// Map a frame id to its slot, rejecting ids past the configured range.
    ///
    /// The bound is `frame_id > capacity`, so an id equal to the capacity is
    /// still accepted.
    fn slot_of(&self, frame_id: FrameId) -> Result<usize> {
        if frame_id.index() > self.capacity {
            return Err(Error::FrameOutOfRange {
                frame_id,
                capacity: self.capacity,
            });
        }
        Ok(frame_id.index())
    }

    fn push_front(&mut self, slot: usize, segment: Segment) {
        match segment {
            Segment::History => self.history.push_front(&mut self.links, slot),
            Segment::Cached => self.cached.push_front(&mut self.links, slot),
        }
    }

    fn unlink(&mut self, slot: usize, segment: Segment) {
        match segment {
            Segment::History => self.history.unlink(&mut self.links, slot),
            Segment::Cached => self.cached.unlink(&mut self.links, slot),
        }
    }

    fn record_access(&mut self, frame_id: FrameId) -> Result<()> {
        let slot = self.slot_of(frame_id)?;

        let (access_count, segment) = match self.records[slot].as_mut() {
            Some(record) => {
                record.access_count += 1;
                (record.access_count, record.segment)
            }
            None => {
                trace!(%frame_id, "tracking new frame");
                self.records[slot] = Some(FrameRecord {
                    access_count: 1,
                    evictable: true,
                    segment: Segment::History,
                });
                self.push_front(slot, Segment::History);
                self.curr_size += 1;
                (1, Segment::History)
            }
        };

        // Reaching K promotes the frame; every access after that refreshes
        // its spot at the front of `cached`.
        if access_count >= self.k {
            self.unlink(slot, segment);
            self.push_front(slot, Segment::Cached);
            if let Some(record) = self.records[slot].as_mut() {
                record.segment = Segment::Cached;
            }
        }

        trace!(%frame_id, access_count, "recorded access");
        Ok(())
    }

    fn set_evictable(&mut self, frame_id: FrameId, evictable: bool) -> Result<()> {
        let slot = self.slot_of(frame_id)?;
        let record = self.records[slot]
            .as_mut()
            .ok_or(Error::FrameNotTracked(frame_id))?;

        match (record.evictable, evictable) {
            (true, false) => self.curr_size -= 1,
            (false, true) => self.curr_size += 1,
            _ => {}
        }
        record.evictable = evictable;
        Ok(())
    }

    fn evict(&mut self) -> Option<FrameId> {
        if self.curr_size == 0 {
            return None;
        }

        let records = &self.records;
        let is_evictable = |slot: &usize| records[*slot].is_some_and(|r| r.evictable);
        let slot = self
            .history
            .iter_lru(&self.links)
            .find(is_evictable)
            .or_else(|| self.cached.iter_lru(&self.links).find(is_evictable))?;

        self.forget(slot);
        Some(FrameId::new(slot))
    }

    fn remove(&mut self, frame_id: FrameId) -> Result<()> {
        let slot = self.slot_of(frame_id)?;
        let record = self.records[slot].ok_or(Error::FrameNotTracked(frame_id))?;
        if !record.evictable {
            return Err(Error::FrameNotEvictable(frame_id));
        }

        self.forget(slot);
        Ok(())
    }

    /// Drop an evictable frame's record and list position.
    fn forget(&mut self, slot: usize) {
        if let Some(record) = self.records[slot].take() {
            self.unlink(slot, record.segment);
            if record.evictable {
                self.curr_size -= 1;
            }
        }
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        let history: Vec<usize> = self.history.iter_mru(&self.links).collect();
        let cached: Vec<usize> = self.cached.iter_mru(&self.links).collect();
        assert_eq!(history.len(), self.history.len());
        assert_eq!(cached.len(), self.cached.len());

        let mut evictable = 0;
        for (slot, record) in self.records.iter().enumerate() {
            let Some(record) = record else {
                assert!(!history.contains(&slot) && !cached.contains(&slot));
                continue;
            };
            let (own, other) = match record.segment {
                Segment::History => (&history, &cached),
                Segment::Cached => (&cached, &history),
            };
            assert_eq!(own.iter().filter(|&&s| s == slot).count(), 1);
            assert!(!other.contains(&slot));
            assert_eq!(record.segment == Segment::Cached, record.access_count >= self.k);
            evictable += usize::from(record.evictable);
        }
        assert_eq!(evictable, self.curr_size);
    }
}

/// The LRU-K replacer.
///
/// All operations take one internal lock for their full duration, so each is
/// atomic with respect to the others. Invalid input (an out-of-range id, an
/// untracked frame, removing a pinned frame) is a no-op that is logged at
/// `debug` level and counted in [`ReplacerStats::ignored`].
///
/// # Example
/// ```
/// use bufcore::buffer::replacer::LruKReplacer;
/// use bufcore::FrameId;
///
/// let replacer = LruKReplacer::new(8, 2);
/// replacer.record_access(FrameId::new(1));
/// replacer.record_access(FrameId::new(2));
/// replacer.record_access(FrameId::new(1)); // frame 1 reaches K
///
/// // Frame 2 has fewer than K accesses, so it goes first.
/// assert_eq!(replacer.evict(), Some(FrameId::new(2)));
/// assert_eq!(replacer.evict(), Some(FrameId::new(1)));
/// assert_eq!(replacer.evict(), None);
/// ```
#[derive(Debug)]
pub struct LruKReplacer {
    inner: Mutex<LruKInner>,
    capacity: usize,
    k: usize,
    stats: ReplacerStats,
}

impl LruKReplacer {
    /// Create a replacer for a pool of `capacity` frames.
    ///
    /// # Panics
    /// Panics if `k` is 0.
    pub fn new(capacity: usize, k: usize) -> Self {
        assert!(k > 0, "k must be > 0");

        Self {
            inner: Mutex::new(LruKInner::new(capacity, k)),
            capacity,
            k,
            stats: ReplacerStats::new(),
        }
    }

    /// Create a replacer from a validated config.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if the config fails validation
    pub fn from_config(config: ReplacerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity, config.k))
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Record that `frame_id` was accessed.
    ///
    /// Starts tracking the frame (as evictable) on its first access.
    pub fn record_access(&self, frame_id: FrameId) {
        let result = self.inner.lock().record_access(frame_id);
        self.settle("record_access", result, Some(&self.stats.accesses));
    }

    /// Pin (`false`) or unpin (`true`) a tracked frame.
    pub fn set_evictable(&self, frame_id: FrameId, evictable: bool) {
        let result = self.inner.lock().set_evictable(frame_id, evictable);
        self.settle("set_evictable", result, None);
    }

    /// Pick a victim, forget its history and return it.
    pub fn evict(&self) -> Option<FrameId> {
        let victim = self.inner.lock().evict();
        match victim {
            Some(frame_id) => {
                ReplacerStats::bump(&self.stats.evictions);
                debug!(%frame_id, "evicted frame");
            }
            None => debug!("no evictable frame"),
        }
        victim
    }

    /// Forget an evictable frame without choosing it as a victim.
    pub fn remove(&self, frame_id: FrameId) {
        let result = self.inner.lock().remove(frame_id);
        self.settle("remove", result, Some(&self.stats.removals));
    }

    /// Number of evictable frames.
    pub fn size(&self) -> usize {
        self.inner.lock().curr_size
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Accesses recorded for a frame, or `None` if it is not tracked.
    pub fn access_count(&self, frame_id: FrameId) -> Option<usize> {
        let inner = self.inner.lock();
        let slot = inner.slot_of(frame_id).ok()?;
        inner.records[slot].map(|r| r.access_count)
    }

    /// Whether a tracked frame is evictable, or `None` if it is not tracked.
    pub fn is_evictable(&self, frame_id: FrameId) -> Option<bool> {
        let inner = self.inner.lock();
        let slot = inner.slot_of(frame_id).ok()?;
        inner.records[slot].map(|r| r.evictable)
    }

    /// Number of tracked frames, pinned or not.
    pub fn tracked_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.history.len() + inner.cached.len()
    }

    pub fn stats(&self) -> &ReplacerStats {
        &self.stats
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Count and log the outcome of a mutating call.
    ///
    /// Runs after the lock guard is gone.
    fn settle(&self, op: &'static str, result: Result<()>, on_success: Option<&AtomicU64>) {
        match result {
            Ok(()) => {
                if let Some(counter) = on_success {
                    ReplacerStats::bump(counter);
                }
            }
            Err(err) => {
                ReplacerStats::bump(&self.stats.ignored);
                debug!(op, %err, "replacer call ignored");
            }
        }
    }
}

impl Replacer for LruKReplacer {
    fn record_access(&self, frame_id: FrameId) {
        LruKReplacer::record_access(self, frame_id)
    }

    fn set_evictable(&self, frame_id: FrameId, evictable: bool) {
        LruKReplacer::set_evictable(self, frame_id, evictable)
    }

    fn evict(&self) -> Option<FrameId> {
        LruKReplacer::evict(self)
    }

    fn remove(&self, frame_id: FrameId) {
        LruKReplacer::remove(self, frame_id)
    }

    fn size(&self) -> usize {
        LruKReplacer::size(self)
    }
}
