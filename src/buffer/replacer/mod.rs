//! Eviction policy implementations (replacers).
//!
//! - [`Replacer`] - the interface a buffer pool drives
//! - [`LruKReplacer`] - K-distance based policy with an LRU tie-break

mod frame_list;
mod lru_k;

pub use lru_k::LruKReplacer;

use crate::common::FrameId;

/// A frame-eviction policy.
///
/// Every method takes `&self`: implementations guard their own state, so a
/// buffer pool can share one replacer across threads without wrapping it.
pub trait Replacer: Send + Sync {
    /// Record that the given frame was accessed.
    fn record_access(&self, frame_id: FrameId);

    /// Mark a frame as evictable (unpinned) or not (pinned).
    fn set_evictable(&self, frame_id: FrameId, evictable: bool);

    /// Select and forget a victim frame.
    ///
    /// Returns `None` if no frame is evictable.
    fn evict(&self) -> Option<FrameId>;

    /// Drop an evictable frame's history.
    fn remove(&self, frame_id: FrameId);

    /// Number of evictable frames.
    fn size(&self) -> usize;
}
