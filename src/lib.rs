//! bufcore - the two in-memory building blocks of a buffer pool.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            Buffer pool manager (external caller)                │
//! │   fetch / unpin / new / delete page                             │
//! └───────────────┬─────────────────────────────────┬───────────────┘
//!                 │ record_access, set_evictable,   │ find, insert,
//!                 │ evict, remove                   │ remove
//!                 ↓                                 ↓
//! ┌───────────────────────────────┐ ┌───────────────────────────────┐
//! │  LruKReplacer (buffer/)       │ │  ExtendibleHashTable (hash/)  │
//! │  history list  (< K accesses) │ │  directory of 2^d slots       │
//! │  cached list   (>= K)         │ │  bucket arena, split on full  │
//! │  one Mutex                    │ │  one Mutex                    │
//! └───────────────────────────────┘ └───────────────────────────────┘
//! ```
//!
//! The two components never call each other. Each guards its state with its
//! own lock and can be shared across threads behind an `Arc`.
//!
//! # Modules
//! - [`common`] - Identifiers, configuration, error type
//! - [`buffer`] - Frame eviction policy (LRU-K)
//! - [`hash`] - Extendible hash table
//!
//! # Quick Start
//! ```
//! use bufcore::{FrameId, LruKReplacer, PageId, PageTable};
//!
//! let replacer = LruKReplacer::new(16, 2);
//! let page_table = PageTable::new(4);
//!
//! // Page 7 is loaded into frame 3 and pinned.
//! page_table.insert(PageId::new(7), FrameId::new(3));
//! replacer.record_access(FrameId::new(3));
//! replacer.set_evictable(FrameId::new(3), false);
//! assert_eq!(replacer.evict(), None);
//!
//! // Unpinned: frame 3 can now be reclaimed.
//! replacer.set_evictable(FrameId::new(3), true);
//! assert_eq!(replacer.evict(), Some(FrameId::new(3)));
//! assert!(page_table.remove(&PageId::new(7)));
//! ```

pub mod buffer;
pub mod common;
pub mod hash;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, FrameId, HashTableConfig, PageId, ReplacerConfig, Result};

pub use buffer::{LruKReplacer, Replacer, ReplacerStats};
pub use hash::{ExtendibleHashTable, HashTableStats, PageTable};
