//! Buffer management policies.
//!
//! A buffer pool keeps a fixed set of frames in memory and must pick one to
//! reclaim when it needs room. This module holds that decision:
//!
//! - [`replacer`] - eviction policies behind the [`Replacer`] trait
//! - [`ReplacerStats`] - replacer operation counters
//!
//! The pool itself (frames, pinning, disk I/O) lives outside this crate and
//! drives a replacer through `record_access`, `set_evictable`, `evict` and
//! `remove`.

pub mod replacer;
mod stats;

pub use replacer::{LruKReplacer, Replacer};
pub use stats::{ReplacerStats, ReplacerStatsSnapshot};
