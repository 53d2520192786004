//! Extendible hash table.
//!
//! # Layout
//! ```text
//!   global_depth = 2
//!
//!   slots (index = low 2 hash bits)        buckets (arena)
//!   ┌────┐
//!   │ 00 │──────────────────────────────▶ [0] depth 2  { k: ..00 }
//!   ├────┤
//!   │ 01 │───────────┐
//!   ├────┤           ├──────────────────▶ [1] depth 1  { k: ...1 }
//!   │ 11 │───────────┘
//!   ├────┤
//!   │ 10 │──────────────────────────────▶ [2] depth 2  { k: ..10 }
//!   └────┘
//! ```
//!
//! Slots hold [`BucketId`]s into an arena instead of shared references. A
//! bucket with local depth `d` is referenced by every slot that agrees on the
//! low `d` bits of its index. When a full bucket splits, the low half reuses
//! the old arena slot and the high half is appended, so the arena only ever
//! holds live buckets.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::bucket::{Bucket, BucketInsert};
use super::stats::HashTableStats;
use crate::common::config::DEFAULT_BUCKET_CAPACITY;
use crate::common::{HashTableConfig, Result};

/// Stable index of a bucket in the directory's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BucketId(usize);

/// The low `depth` bits of `hash`.
#[inline]
fn low_bits(hash: u64, depth: u32) -> u64 {
    if depth >= u64::BITS {
        hash
    } else {
        hash & ((1u64 << depth) - 1)
    }
}

/// What an insert did to the directory, for the stats counters.
#[derive(Debug, Default)]
struct InsertReport {
    updated: bool,
    splits: u64,
    doublings: u64,
}

/// Directory and bucket arena, guarded by the table's lock.
#[derive(Debug)]
struct Directory<K, V> {
    global_depth: u32,
    bucket_capacity: usize,
    /// `2^global_depth` entries.
    slots: Vec<BucketId>,
    buckets: Vec<Bucket<K, V>>,
    /// Total entries across all buckets.
    len: usize,
}

impl<K: Hash + Eq, V> Directory<K, V> {
    fn new(bucket_capacity: usize) -> Self {
        Self {
            global_depth: 0,
            bucket_capacity,
            slots: vec![BucketId(0)],
            buckets: vec![Bucket::new(bucket_capacity, 0)],
            len: 0,
        }
    }

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        low_bits(hash, self.global_depth) as usize
    }

    #[inline]
    fn bucket(&self, hash: u64) -> &Bucket<K, V> {
        &self.buckets[self.slots[self.index_of(hash)].0]
    }

    #[inline]
    fn bucket_mut(&mut self, hash: u64) -> &mut Bucket<K, V> {
        let id = self.slots[self.index_of(hash)];
        &mut self.buckets[id.0]
    }

    /// Insert or overwrite, splitting until the target bucket has room.
    fn insert<S: BuildHasher>(
        &mut self,
        hasher: &S,
        hash: u64,
        mut key: K,
        mut value: V,
    ) -> InsertReport {
        let mut report = InsertReport::default();

        loop {
            let slot = self.index_of(hash);
            let id = self.slots[slot];
            match self.buckets[id.0].insert(key, value) {
                BucketInsert::Inserted => {
                    self.len += 1;
                    return report;
                }
                BucketInsert::Updated => {
                    report.updated = true;
                    return report;
                }
                BucketInsert::Full(k, v) => {
                    key = k;
                    value = v;
                }
            }

            // Keys with one identical full hash can never be told apart by
            // another bit, so splitting would only grow the directory forever.
            let bucket = &mut self.buckets[id.0];
            if bucket.keys().all(|k| hasher.hash_one(k) == hash) {
                warn!(
                    hash,
                    bucket_capacity = self.bucket_capacity,
                    "hash collision fills bucket, storing past capacity"
                );
                bucket.push_unchecked(key, value);
                self.len += 1;
                return report;
            }

            if self.split(hasher, slot) {
                report.doublings += 1;
            }
            report.splits += 1;
        }
    }

    /// Split the bucket behind `slot` in two.
    ///
    /// Returns whether the directory had to double first.
    fn split<S: BuildHasher>(&mut self, hasher: &S, slot: usize) -> bool {
        let id = self.slots[slot];
        let old_depth = self.buckets[id.0].local_depth();

        let doubled = old_depth == self.global_depth;
        if doubled {
            self.slots.extend_from_within(..);
            self.global_depth += 1;
            debug!(global_depth = self.global_depth, "directory doubled");
        }

        let new_depth = old_depth + 1;
        let split_bit = 1u64 << old_depth;
        let mut low = Bucket::new(self.bucket_capacity, new_depth);
        let mut high = Bucket::new(self.bucket_capacity, new_depth);

        for (k, v) in self.buckets[id.0].take_entries() {
            if hasher.hash_one(&k) & split_bit == 0 {
                low.push_unchecked(k, v);
            } else {
                high.push_unchecked(k, v);
            }
        }

        let high_id = BucketId(self.buckets.len());
        self.buckets[id.0] = low;
        self.buckets.push(high);

        for (index, target) in self.slots.iter_mut().enumerate() {
            if *target == id && (index as u64) & split_bit != 0 {
                *target = high_id;
            }
        }

        debug!(
            slot,
            local_depth = new_depth,
            num_buckets = self.buckets.len(),
            "split bucket"
        );
        doubled
    }

    #[cfg(test)]
    fn check_invariants<S: BuildHasher>(&self, hasher: &S) {
        assert_eq!(self.slots.len(), 1usize << self.global_depth);

        let mut refs = vec![0usize; self.buckets.len()];
        for (index, id) in self.slots.iter().enumerate() {
            let bucket = &self.buckets[id.0];
            let depth = bucket.local_depth();
            assert!(depth <= self.global_depth);

            // Every slot sharing the low `depth` bits maps to this bucket.
            let canonical = low_bits(index as u64, depth);
            assert_eq!(self.slots[canonical as usize], *id);

            for key in bucket.keys() {
                assert_eq!(low_bits(hasher.hash_one(key), depth), canonical);
            }
            refs[id.0] += 1;
        }

        let mut total = 0;
        for (bucket, &count) in self.buckets.iter().zip(&refs) {
            assert_eq!(count, 1usize << (self.global_depth - bucket.local_depth()));
            assert!(bucket.len() <= self.bucket_capacity);
            total += bucket.len();
        }
        assert_eq!(total, self.len);
    }
}

/// A thread-safe extendible hash table.
///
/// One lock guards the whole directory, so a split is never visible half
/// done. Values are cloned out by [`find`](Self::find) and moved in by
/// [`insert`](Self::insert); buckets are never exposed.
///
/// # Example
/// ```
/// use bufcore::hash::ExtendibleHashTable;
///
/// let table = ExtendibleHashTable::new(2);
/// for i in 0..16u32 {
///     table.insert(i, i * 100);
/// }
///
/// assert_eq!(table.find(&7), Some(700));
/// assert!(table.remove(&7));
/// assert_eq!(table.find(&7), None);
/// assert!(table.num_buckets() >= 8);
/// ```
#[derive(Debug)]
pub struct ExtendibleHashTable<K, V, S = RandomState> {
    directory: Mutex<Directory<K, V>>,
    hasher: S,
    bucket_capacity: usize,
    stats: HashTableStats,
}

impl<K: Hash + Eq, V> ExtendibleHashTable<K, V, RandomState> {
    /// Create a table whose buckets hold `bucket_capacity` entries.
    ///
    /// # Panics
    /// Panics if `bucket_capacity` is 0.
    pub fn new(bucket_capacity: usize) -> Self {
        Self::with_hasher(bucket_capacity, RandomState::new())
    }

    /// Create a table from a validated config.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if the config fails validation
    pub fn from_config(config: HashTableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.bucket_capacity))
    }
}

impl<K: Hash + Eq, V> Default for ExtendibleHashTable<K, V, RandomState> {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_CAPACITY)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ExtendibleHashTable<K, V, S> {
    /// Create a table that hashes keys with `hasher`.
    ///
    /// # Panics
    /// Panics if `bucket_capacity` is 0.
    pub fn with_hasher(bucket_capacity: usize, hasher: S) -> Self {
        assert!(bucket_capacity > 0, "bucket_capacity must be > 0");

        Self {
            directory: Mutex::new(Directory::new(bucket_capacity)),
            hasher,
            bucket_capacity,
            stats: HashTableStats::new(),
        }
    }

    #[inline]
    fn hash<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        self.hasher.hash_one(key)
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Directory slot `key` currently routes to.
    pub fn index_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        self.directory.lock().index_of(hash)
    }

    /// Look up the value stored for `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let hash = self.hash(key);
        let found = self.directory.lock().bucket(hash).find(key).cloned();

        HashTableStats::add(&self.stats.lookups, 1);
        if found.is_some() {
            HashTableStats::add(&self.stats.hits, 1);
        }
        found
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        let found = self.directory.lock().bucket(hash).find(key).is_some();

        HashTableStats::add(&self.stats.lookups, 1);
        if found {
            HashTableStats::add(&self.stats.hits, 1);
        }
        found
    }

    /// Insert `key`, overwriting any existing value.
    ///
    /// Never fails: a full bucket is split (doubling the directory when
    /// needed) until the entry fits.
    pub fn insert(&self, key: K, value: V) {
        let hash = self.hash(&key);
        let report = self
            .directory
            .lock()
            .insert(&self.hasher, hash, key, value);

        if report.updated {
            HashTableStats::add(&self.stats.updates, 1);
        } else {
            HashTableStats::add(&self.stats.inserts, 1);
        }
        HashTableStats::add(&self.stats.splits, report.splits);
        HashTableStats::add(&self.stats.doublings, report.doublings);
    }

    /// Delete `key`. Returns whether it was present.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        let removed = {
            let mut directory = self.directory.lock();
            let removed = directory.bucket_mut(hash).remove(key);
            if removed {
                directory.len -= 1;
            }
            removed
        };

        if removed {
            HashTableStats::add(&self.stats.removals, 1);
        }
        removed
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of low hash bits used to index the directory.
    pub fn global_depth(&self) -> u32 {
        self.directory.lock().global_depth
    }

    /// Local depth of the bucket behind directory slot `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= 2^global_depth`.
    pub fn local_depth(&self, slot: usize) -> u32 {
        let directory = self.directory.lock();
        let id = directory.slots[slot];
        directory.buckets[id.0].local_depth()
    }

    /// Number of distinct buckets.
    pub fn num_buckets(&self) -> usize {
        self.directory.lock().buckets.len()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.directory.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    pub fn stats(&self) -> &HashTableStats {
        &self.stats
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        self.directory.lock().check_invariants(&self.hasher);
    }
}
