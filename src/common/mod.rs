//! Common types shared by the replacer and the hash table.
//!
//! - Configuration (defaults and validated settings)
//! - Error types
//! - Identifiers (PageId, FrameId)

pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use config::{HashTableConfig, ReplacerConfig};
pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
