//! Hash containers.
//!
//! - [`ExtendibleHashTable`] - generic table that grows by splitting buckets
//! - [`PageTable`] - the page-to-frame mapping a buffer pool keeps
//! - [`HashTableStats`] - operation counters

mod bucket;
mod extendible;
mod stats;

pub use extendible::ExtendibleHashTable;
pub use stats::{HashTableStats, HashTableStatsSnapshot};

use crate::common::{FrameId, PageId};

/// Maps pages resident in the buffer pool to the frames holding them.
pub type PageTable = ExtendibleHashTable<PageId, FrameId>;
