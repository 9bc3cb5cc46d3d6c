//! LRU (Least Recently Used) cache implementation
//!
//! The ordered map's front is the most recently used entry and its back is
//! the eviction candidate, so promotion and eviction are both O(1).

use std::borrow::Borrow;
use std::hash::Hash;

use orderedmap::{Iter, OrderedMap};
use tracing::debug;

/// LRU cache with fixed capacity
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    map: OrderedMap<K, V>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            map: OrderedMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Get a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.move_to_front(key).ok()?;
        self.map.get(key)
    }

    /// Get a value without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Check for a key without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert or overwrite a key, marking it most recently used
    ///
    /// Returns the entry evicted to make room, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            // present, so the move cannot fail
            let _ = self.map.move_to_front(&key);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        // absent, so the push cannot fail
        let _ = self.map.push_front(key, value);
        evicted
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Change the capacity, evicting cold entries that no longer fit
    ///
    /// Returns the evicted entries, least recently used first.
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<(K, V)> {
        assert!(capacity > 0, "Capacity must be greater than 0");

        debug!(from = self.capacity, to = capacity, "resizing LRU cache");
        self.capacity = capacity;

        let mut evicted = Vec::new();
        while self.map.len() > self.capacity {
            match self.evict() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }
        evicted
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Vec<K> {
        self.map.keys()
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let entry = self.map.pop_back();
        if entry.is_some() {
            debug!(len = self.map.len(), capacity = self.capacity, "evicted LRU entry");
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_basic() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(3, "c"), Some((1, "a")));

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_lru_get_promotes() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1);
        assert_eq!(cache.put(3, "c"), Some((2, "b")));

        assert_eq!(cache.keys(), vec![3, 1]);
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.peek(&1), Some(&"a"));
        assert!(cache.contains(&1));
        assert_eq!(cache.put(3, "c"), Some((1, "a")));
    }

    #[test]
    fn test_lru_overwrite() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(1, "z"), None);

        assert_eq!(cache.keys(), vec![1, 2]);
        assert_eq!(cache.peek(&1), Some(&"z"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.remove(&2), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&2), None);
    }

    #[test]
    fn test_lru_set_capacity() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.put(i, i * 10);
        }

        let evicted = cache.set_capacity(2);
        assert_eq!(evicted, vec![(0, 0), (1, 10)]);
        assert_eq!(cache.keys(), vec![3, 2]);
        assert_eq!(cache.capacity(), 2);

        assert!(cache.set_capacity(8).is_empty());
        cache.put(9, 90);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache: LruCache<String, usize> = LruCache::new(2);
        cache.put("alpha".to_string(), 1);
        cache.put("beta".to_string(), 2);

        assert_eq!(cache.get("alpha"), Some(&1));
        let order: Vec<_> = cache.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than 0")]
    fn test_lru_zero_capacity() {
        let _cache: LruCache<u32, u32> = LruCache::new(0);
    }
}
