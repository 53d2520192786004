//! Configuration for the replacer and the hash table.
//!
//! Both components can be built straight from their constructor arguments,
//! but the config structs give a single place to hold defaults and to
//! validate values before anything is allocated.

use crate::common::{Error, Result};

/// Default K for the LRU-K replacer.
///
/// A frame needs this many recorded accesses before it leaves the history
/// list and competes on plain recency with the other cached frames.
pub const DEFAULT_REPLACER_K: usize = 10;

/// Default number of entries a hash bucket holds before it must split.
pub const DEFAULT_BUCKET_CAPACITY: usize = 4;

/// Default number of frames a replacer tracks.
pub const DEFAULT_POOL_SIZE: usize = 64;

/// Settings for [`LruKReplacer`](crate::buffer::replacer::LruKReplacer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacerConfig {
    /// Number of frames in the pool the replacer serves.
    pub capacity: usize,
    /// Access count at which a frame graduates to the cached list.
    pub k: usize,
}

impl ReplacerConfig {
    pub fn new(capacity: usize, k: usize) -> Self {
        Self { capacity, k }
    }

    /// Check the values before building a replacer.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `k` is zero
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("replacer k must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for ReplacerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE, DEFAULT_REPLACER_K)
    }
}

/// Settings for [`ExtendibleHashTable`](crate::hash::ExtendibleHashTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashTableConfig {
    /// Maximum entries per bucket.
    pub bucket_capacity: usize,
}

impl HashTableConfig {
    pub fn new(bucket_capacity: usize) -> Self {
        Self { bucket_capacity }
    }

    /// Check the values before building a table.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `bucket_capacity` is zero (no insert
    ///   could ever succeed)
    pub fn validate(&self) -> Result<()> {
        if self.bucket_capacity == 0 {
            return Err(Error::InvalidConfig(
                "bucket capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_CAPACITY)
    }
}
