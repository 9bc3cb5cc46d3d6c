//! Ordered map: a hash table of node handles over the list engine
//!
//! Every mutating operation touches the table and the list together, so a key
//! is in the table iff a node carrying that key is linked in the list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter};
use crate::list::{Handle, List};

/// Hash map that keeps its entries in a caller-controlled order
///
/// Lookup, insertion at either end or next to an existing key, moves and
/// removal are all O(1). Order is purely positional: it never depends on
/// comparing keys or values.
///
/// The map does no internal synchronization. Wrap it in a lock to share it
/// between threads.
#[derive(Clone)]
pub struct OrderedMap<K, V, S = RandomState> {
    table: HashMap<K, Handle, S>,
    list: List<(K, V)>,
}

impl<K, V> OrderedMap<K, V, RandomState> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Create an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Create an empty map using `hasher` for the lookup table
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashMap::with_hasher(hasher),
            list: List::new(),
        }
    }

    /// Create an empty map with room for `capacity` entries, using `hasher`
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: HashMap::with_capacity_and_hasher(capacity, hasher),
            list: List::with_capacity(capacity),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// The lookup table's hasher
    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Entry at the front, or `None` if the map is empty
    pub fn front(&self) -> Option<(&K, &V)> {
        self.list.front().map(|h| self.entry(h))
    }

    /// Entry at the back, or `None` if the map is empty
    pub fn back(&self) -> Option<(&K, &V)> {
        self.list.back().map(|h| self.entry(h))
    }

    /// Iterate entries front to back. Use `.rev()` for back to front.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.list)
    }

    /// Visit entries front to back until `f` returns `false`
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter() {
            if !f(k, v) {
                return;
            }
        }
    }

    /// Visit entries back to front until `f` returns `false`
    pub fn range_reverse<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter().rev() {
            if !f(k, v) {
                return;
            }
        }
    }

    fn entry(&self, h: Handle) -> (&K, &V) {
        let (k, v) = self.list.get(h);
        (k, v)
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Get the value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key).map(|&h| &self.list.get(h).1)
    }

    /// Get the stored key and value for `key`
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key).map(|&h| self.entry(h))
    }

    /// Get a mutable reference to the value under `key`, leaving its position alone
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h = *self.table.get(key)?;
        Some(&mut self.list.get_mut(h).1)
    }

    /// Check whether `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Replace the value of an existing key in place and return the old one
    ///
    /// # Errors
    /// * [`Error::KeyMissing`] if `key` is absent
    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => reject("update", Error::KeyMissing),
        }
    }

    /// Move an existing key to the front
    ///
    /// # Errors
    /// * [`Error::KeyMissing`] if `key` is absent
    pub fn move_to_front<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h = self.handle(key, "move_to_front", Error::KeyMissing)?;
        self.list.move_to_front(h);
        Ok(())
    }

    /// Move an existing key to the back
    ///
    /// # Errors
    /// * [`Error::KeyMissing`] if `key` is absent
    pub fn move_to_back<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h = self.handle(key, "move_to_back", Error::KeyMissing)?;
        self.list.move_to_back(h);
        Ok(())
    }

    /// Move an existing key immediately after `mark`
    ///
    /// Moving a key relative to itself succeeds without doing anything.
    ///
    /// # Errors
    /// * [`Error::KeyMissing`] if either `key` or `mark` is absent
    pub fn move_after<Q>(&mut self, key: &Q, mark: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if key == mark {
            return Ok(());
        }
        let h = self.handle(key, "move_after", Error::KeyMissing)?;
        let mark_h = self.handle(mark, "move_after", Error::KeyMissing)?;
        self.list.move_after(h, mark_h);
        Ok(())
    }

    /// Move an existing key immediately before `mark`
    ///
    /// Moving a key relative to itself succeeds without doing anything.
    ///
    /// # Errors
    /// * [`Error::KeyMissing`] if either `key` or `mark` is absent
    pub fn move_before<Q>(&mut self, key: &Q, mark: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if key == mark {
            return Ok(());
        }
        let h = self.handle(key, "move_before", Error::KeyMissing)?;
        let mark_h = self.handle(mark, "move_before", Error::KeyMissing)?;
        self.list.move_before(h, mark_h);
        Ok(())
    }

    /// Remove `key` and return its value, or `None` if it was absent
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove `key` and return the stored key and value
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h = self.table.remove(key)?;
        Some(self.list.remove(h))
    }

    /// Remove and return the front entry
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let (k, v) = self.list.pop_front()?;
        self.table.remove(&k);
        Some((k, v))
    }

    /// Remove and return the back entry
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let (k, v) = self.list.pop_back()?;
        self.table.remove(&k);
        Some((k, v))
    }

    /// Entry following `key`, or `None` if `key` is absent or at the back
    pub fn next<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h = *self.table.get(key)?;
        self.list.next(h).map(|n| self.entry(n))
    }

    /// Entry preceding `key`, or `None` if `key` is absent or at the front
    pub fn prev<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let h = *self.table.get(key)?;
        self.list.prev(h).map(|p| self.entry(p))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        debug!(len = self.len(), "clearing ordered map");
        self.table.clear();
        self.list.clear();
    }

    /// Reserve room for at least `additional` more entries
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
        self.list.reserve(additional);
    }

    /// Release spare capacity in both the table and the node arena
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
        self.list.shrink_to_fit();
    }

    fn handle<Q>(&self, key: &Q, op: &'static str, err: Error) -> Result<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.table.get(key) {
            Some(&h) => Ok(h),
            None => reject(op, err),
        }
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Insert a new entry at the front
    ///
    /// # Errors
    /// * [`Error::KeyAlreadyPresent`] if `key` exists; the map is unchanged
    pub fn push_front(&mut self, key: K, value: V) -> Result<()> {
        self.vacant(&key, "push_front")?;
        let h = self.list.push_front((key.clone(), value));
        self.table.insert(key, h);
        Ok(())
    }

    /// Insert a new entry at the back
    ///
    /// # Errors
    /// * [`Error::KeyAlreadyPresent`] if `key` exists; the map is unchanged
    pub fn push_back(&mut self, key: K, value: V) -> Result<()> {
        self.vacant(&key, "push_back")?;
        let h = self.list.push_back((key.clone(), value));
        self.table.insert(key, h);
        Ok(())
    }

    /// Insert a new entry immediately after `mark`
    ///
    /// # Errors
    /// * [`Error::KeyAlreadyPresent`] if `key` exists (checked first)
    /// * [`Error::MarkKeyMissing`] if `mark` is absent
    ///
    /// The map is unchanged on either error.
    pub fn insert_after<Q>(&mut self, key: K, value: V, mark: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vacant(&key, "insert_after")?;
        let mark_h = self.handle(mark, "insert_after", Error::MarkKeyMissing)?;
        let h = self.list.insert_after((key.clone(), value), mark_h);
        self.table.insert(key, h);
        Ok(())
    }

    /// Insert a new entry immediately before `mark`
    ///
    /// # Errors
    /// * [`Error::KeyAlreadyPresent`] if `key` exists (checked first)
    /// * [`Error::MarkKeyMissing`] if `mark` is absent
    ///
    /// The map is unchanged on either error.
    pub fn insert_before<Q>(&mut self, key: K, value: V, mark: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vacant(&key, "insert_before")?;
        let mark_h = self.handle(mark, "insert_before", Error::MarkKeyMissing)?;
        let h = self.list.insert_before((key.clone(), value), mark_h);
        self.table.insert(key, h);
        Ok(())
    }

    /// Keys front to back, in a new vector
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn vacant(&self, key: &K, op: &'static str) -> Result<()> {
        if self.table.contains_key(key) {
            return reject(op, Error::KeyAlreadyPresent);
        }
        Ok(())
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Entries front to back, in a new vector
    pub fn items(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Unordered snapshot of the contents as a plain hash map
    pub fn to_map(&self) -> HashMap<K, V, S> {
        let mut out = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (k, v) in self.iter() {
            out.insert(k.clone(), v.clone());
        }
        out
    }

    /// New map holding, in the same order, the entries for which `f` is true
    pub fn filter<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut out = Self::with_hasher(self.hasher().clone());
        for (k, v) in self.iter() {
            if !f(k, v) {
                continue;
            }
            if let Err(err) = out.push_back(k.clone(), v.clone()) {
                panic!("filter: copying an entry failed ({err}), map keys are not unique");
            }
        }
        out
    }

    /// New map holding the same entries in reverse order
    pub fn reverse(&self) -> Self {
        let mut out = Self::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (k, v) in self.iter() {
            if let Err(err) = out.push_front(k.clone(), v.clone()) {
                panic!("reverse: copying an entry failed ({err}), map keys are not unique");
            }
        }
        out
    }
}

fn reject<T>(op: &'static str, err: Error) -> Result<T> {
    trace!(op, error = %err, "ordered map operation rejected");
    Err(err)
}

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, S> PartialEq for OrderedMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedMap<K, V, S> {}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.list)
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// New keys go to the back; a repeated key has its value replaced in place.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            match self.get_mut(&k) {
                Some(slot) => *slot = v,
                None => {
                    let h = self.list.push_back((k.clone(), v));
                    self.table.insert(k, h);
                }
            }
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        map.extend(iter);
        map
    }
}
