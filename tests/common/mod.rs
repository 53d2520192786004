//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::hash::{BuildHasher, Hasher};

use bufcore::ExtendibleHashTable;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once. `RUST_LOG=debug` shows the
/// replacer's ignored calls and the table's splits.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Hashes integer keys to their own value, like `std::hash<int>` in BusTub.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityState;

#[derive(Debug, Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_i32(&mut self, n: i32) {
        self.0 = n as u32 as u64;
    }
}

impl BuildHasher for IdentityState {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher::default()
    }
}

pub fn identity_table<K, V>(bucket_capacity: usize) -> ExtendibleHashTable<K, V, IdentityState>
where
    K: std::hash::Hash + Eq,
{
    ExtendibleHashTable::with_hasher(bucket_capacity, IdentityState)
}
