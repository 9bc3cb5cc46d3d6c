//! SharedCache: thread-safe handle over an LRU cache

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Cloneable, thread-safe LRU cache
///
/// Every clone shares the same entries and statistics. Reads that promote an
/// entry take the write lock; [`peek`](Self::peek) only needs the read lock.
pub struct SharedCache<K, V> {
    /// LRU cache guarded for concurrent use
    cache: Arc<RwLock<LruCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of items in cache, must be non-zero
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(LruCache::new(capacity))),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Get a clone of the cached value, marking it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cache = self.cache.write();
        match cache.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Get a clone of the cached value without changing its recency
    ///
    /// Not counted in the hit/miss statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.read().peek(key).cloned()
    }

    /// Return the cached value, or compute, cache and return it on a miss
    ///
    /// # Arguments
    /// * `key` - Key to look up
    /// * `load` - Called only on a miss, with no lock held
    pub fn get_or_insert_with<F>(&self, key: K, load: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        trace!("cache miss, loading value");
        let value = load();
        self.put(key, value.clone());
        value
    }

    /// Insert or overwrite a value, marking it most recently used
    ///
    /// # Returns
    /// * The entry evicted to make room, if any
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let evicted = self.cache.write().put(key, value);
        self.stats.record_insert();
        if evicted.is_some() {
            self.stats.record_evictions(1);
        }
        evicted
    }

    /// Remove a value from the cache
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.write().remove(key)
    }

    /// Change the capacity, evicting what no longer fits
    pub fn set_capacity(&self, capacity: usize) -> Vec<(K, V)> {
        let evicted = self.cache.write().set_capacity(capacity);
        self.stats.record_evictions(evicted.len() as u64);
        evicted
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Vec<K> {
        self.cache.read().keys()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.read().capacity()
    }

    /// Drop every entry and reset the statistics
    pub fn clear(&self) {
        self.cache.write().clear();
        self.stats.reset();
    }
}
