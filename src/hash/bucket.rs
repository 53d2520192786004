//! A bucket of the extendible hash table.

use std::borrow::Borrow;

/// Result of offering an entry to a bucket.
#[derive(Debug)]
pub(crate) enum BucketInsert<K, V> {
    /// A new entry was appended.
    Inserted,
    /// The key was already present; its value was replaced.
    Updated,
    /// No room. The entry is handed back untouched.
    Full(K, V),
}

/// Fixed-capacity list of entries with unique keys.
///
/// Entries keep their insertion order. Lookups are a linear scan, which is
/// fine for the handful of entries a bucket holds.
#[derive(Debug)]
pub(crate) struct Bucket<K, V> {
    capacity: usize,
    local_depth: u32,
    entries: Vec<(K, V)>,
}

impl<K: Eq, V> Bucket<K, V> {
    pub(crate) fn new(capacity: usize, local_depth: u32) -> Self {
        Self {
            capacity,
            local_depth,
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn local_depth(&self) -> u32 {
        self.local_depth
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| key.eq(k.borrow()))
            .map(|(_, v)| v)
    }

    /// Delete the entry for `key`. Returns whether one existed.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match self.entries.iter().position(|(k, _)| key.eq(k.borrow())) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Overwrite an existing key, or append if there is room.
    pub(crate) fn insert(&mut self, key: K, value: V) -> BucketInsert<K, V> {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *slot = value;
            return BucketInsert::Updated;
        }
        if self.is_full() {
            return BucketInsert::Full(key, value);
        }
        self.entries.push((key, value));
        BucketInsert::Inserted
    }

    /// Append without the capacity or duplicate checks.
    ///
    /// Used when redistributing a split bucket, whose keys are already
    /// unique, and on the overflow path where no split can help.
    pub(crate) fn push_unchecked(&mut self, key: K, value: V) {
        self.entries.push((key, value));
    }

    /// Move all entries out, leaving the bucket empty.
    pub(crate) fn take_entries(&mut self) -> Vec<(K, V)> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}
