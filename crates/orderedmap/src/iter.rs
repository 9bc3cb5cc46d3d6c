//! Iterators over [`OrderedMap`](crate::OrderedMap) entries

use std::iter::FusedIterator;

use crate::list::{Handle, List};

/// Borrowing iterator, front to back (or back to front via `rev`)
pub struct Iter<'a, K, V> {
    list: &'a List<(K, V)>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(list: &'a List<(K, V)>) -> Self {
        Self {
            list,
            front: list.front(),
            back: list.back(),
            remaining: list.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let h = self.front?;
        self.front = list.next(h);
        self.remaining -= 1;
        let (k, v) = list.get(h);
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let h = self.back?;
        self.back = list.prev(h);
        self.remaining -= 1;
        let (k, v) = list.get(h);
        Some((k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator, front to back
pub struct IntoIter<K, V> {
    list: List<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(list: List<(K, V)>) -> Self {
        Self { list }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
