//! # orderedcache
//!
//! LRU cache layer built on [`orderedmap::OrderedMap`].
//!
//! ## Architecture
//! - **LruCache**: single-threaded; front of the ordered map is most recent
//! - **SharedCache**: `Arc<RwLock<LruCache>>` handle safe to clone across threads
//! - **CacheStats**: atomic hit/miss/insert/eviction counters
//!
//! The ordered map itself does no locking; this crate is where
//! synchronization lives.

#![warn(missing_docs)]

mod cache;
mod lru;
mod stats;

pub use cache::SharedCache;
pub use lru::LruCache;
pub use stats::{CacheStats, StatsSnapshot};
