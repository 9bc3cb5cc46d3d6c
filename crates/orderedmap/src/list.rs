//! Doubly-linked list engine
//!
//! Nodes live in a slot arena and are addressed by [`Handle`], so linking,
//! unlinking and moving are O(1) without raw pointers. Freed slots are
//! recycled through a free list. The engine knows nothing about keys.

/// Stable reference to a linked node
///
/// A handle stays valid until the node is removed or the list is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

/// Node in the doubly-linked list
#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Arena-backed doubly-linked list
#[derive(Debug, Clone)]
pub(crate) struct List<T> {
    nodes: Vec<Option<Node<T>>>,
    free_list: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<T> List<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn front(&self) -> Option<Handle> {
        self.head
    }

    pub(crate) fn back(&self) -> Option<Handle> {
        self.tail
    }

    pub(crate) fn next(&self, h: Handle) -> Option<Handle> {
        self.node(h).next
    }

    pub(crate) fn prev(&self, h: Handle) -> Option<Handle> {
        self.node(h).prev
    }

    pub(crate) fn get(&self, h: Handle) -> &T {
        &self.node(h).value
    }

    pub(crate) fn get_mut(&mut self, h: Handle) -> &mut T {
        &mut self.node_mut(h).value
    }

    pub(crate) fn push_front(&mut self, value: T) -> Handle {
        let h = self.alloc(value);
        self.link(h, None, self.head);
        h
    }

    pub(crate) fn push_back(&mut self, value: T) -> Handle {
        let h = self.alloc(value);
        self.link(h, self.tail, None);
        h
    }

    /// Insert `value` right after `mark`, which must be linked in this list.
    pub(crate) fn insert_after(&mut self, value: T, mark: Handle) -> Handle {
        let next = self.next(mark);
        let h = self.alloc(value);
        self.link(h, Some(mark), next);
        h
    }

    /// Insert `value` right before `mark`, which must be linked in this list.
    pub(crate) fn insert_before(&mut self, value: T, mark: Handle) -> Handle {
        let prev = self.prev(mark);
        let h = self.alloc(value);
        self.link(h, prev, Some(mark));
        h
    }

    pub(crate) fn move_to_front(&mut self, h: Handle) {
        if self.head == Some(h) {
            return;
        }
        self.unlink(h);
        self.link(h, None, self.head);
    }

    pub(crate) fn move_to_back(&mut self, h: Handle) {
        if self.tail == Some(h) {
            return;
        }
        self.unlink(h);
        self.link(h, self.tail, None);
    }

    /// Move `h` right after `mark`. Moving a node relative to itself is a no-op.
    pub(crate) fn move_after(&mut self, h: Handle, mark: Handle) {
        if h == mark || self.next(mark) == Some(h) {
            return;
        }
        self.unlink(h);
        let next = self.next(mark);
        self.link(h, Some(mark), next);
    }

    /// Move `h` right before `mark`. Moving a node relative to itself is a no-op.
    pub(crate) fn move_before(&mut self, h: Handle, mark: Handle) {
        if h == mark || self.prev(mark) == Some(h) {
            return;
        }
        self.unlink(h);
        let prev = self.prev(mark);
        self.link(h, prev, Some(mark));
    }

    /// Detach `h` and hand back its value. The handle is dead afterwards.
    pub(crate) fn remove(&mut self, h: Handle) -> T {
        self.unlink(h);
        let node = self.nodes[h.0]
            .take()
            .expect("`List::remove()` - `handle` is invalid!");
        self.free_list.push(h);
        self.len -= 1;
        node.value
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.head.map(|h| self.remove(h))
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        self.tail.map(|h| self.remove(h))
    }

    /// Drop every node. All outstanding handles become invalid.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes
            .reserve(additional.saturating_sub(self.free_list.len()));
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // Trailing free slots can go; interior ones still anchor live handles.
        while let Some(None) = self.nodes.last() {
            self.nodes.pop();
        }
        let live = self.nodes.len();
        self.free_list.retain(|h| h.0 < live);
        self.nodes.shrink_to_fit();
        self.free_list.shrink_to_fit();
    }

    fn node(&self, h: Handle) -> &Node<T> {
        self.nodes[h.0]
            .as_ref()
            .expect("`List::node()` - `handle` is invalid!")
    }

    fn node_mut(&mut self, h: Handle) -> &mut Node<T> {
        self.nodes[h.0]
            .as_mut()
            .expect("`List::node_mut()` - `handle` is invalid!")
    }

    fn alloc(&mut self, value: T) -> Handle {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        self.len += 1;
        if let Some(h) = self.free_list.pop() {
            self.nodes[h.0] = Some(node);
            h
        } else {
            self.nodes.push(Some(node));
            Handle(self.nodes.len() - 1)
        }
    }

    /// Splice a detached node between `prev` and `next`, which must be adjacent.
    fn link(&mut self, h: Handle, prev: Option<Handle>, next: Option<Handle>) {
        {
            let node = self.node_mut(h);
            node.prev = prev;
            node.next = next;
        }

        match prev {
            Some(prev_h) => self.node_mut(prev_h).next = Some(h),
            None => self.head = Some(h),
        }

        match next {
            Some(next_h) => self.node_mut(next_h).prev = Some(h),
            None => self.tail = Some(h),
        }
    }

    /// Close the gap around `h`, leaving it detached but allocated.
    fn unlink(&mut self, h: Handle) {
        let (prev, next) = {
            let node = self.node_mut(h);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(prev_h) => self.node_mut(prev_h).next = next,
            None => self.head = next,
        }

        match next {
            Some(next_h) => self.node_mut(next_h).prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward<T: Clone>(list: &List<T>) -> Vec<T> {
        let mut out = Vec::new();
        let mut cur = list.front();
        while let Some(h) = cur {
            out.push(list.get(h).clone());
            cur = list.next(h);
        }
        out
    }

    fn backward<T: Clone>(list: &List<T>) -> Vec<T> {
        let mut out = Vec::new();
        let mut cur = list.back();
        while let Some(h) = cur {
            out.push(list.get(h).clone());
            cur = list.prev(h);
        }
        out
    }

    fn check<T: Clone + PartialEq + std::fmt::Debug>(list: &List<T>, want: &[T]) {
        assert_eq!(forward(list), want);
        let mut rev = backward(list);
        rev.reverse();
        assert_eq!(rev, want);
        assert_eq!(list.len(), want.len());
    }

    #[test]
    fn test_empty() {
        let list: List<i32> = List::new();
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        check(&list, &[]);
    }

    #[test]
    fn test_push_front_back() {
        let mut list = List::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        check(&list, &[1, 2, 3]);
    }

    #[test]
    fn test_insert_relative() {
        let mut list = List::new();
        let a = list.push_back('a');
        let c = list.push_back('c');
        list.insert_after('b', a);
        list.insert_after('d', c);
        list.insert_before('_', a);
        check(&list, &['_', 'a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_move_to_ends() {
        let mut list = List::new();
        let a = list.push_back(1);
        list.push_back(2);
        let c = list.push_back(3);

        list.move_to_front(c);
        check(&list, &[3, 1, 2]);

        list.move_to_front(c);
        check(&list, &[3, 1, 2]);

        list.move_to_back(c);
        list.move_to_back(a);
        check(&list, &[2, 3, 1]);
    }

    #[test]
    fn test_move_relative() {
        let mut list = List::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        list.move_after(a, c);
        check(&list, &[2, 3, 1]);

        list.move_before(a, b);
        check(&list, &[1, 2, 3]);

        // already in place
        list.move_after(b, a);
        list.move_before(b, c);
        check(&list, &[1, 2, 3]);

        list.move_after(b, b);
        list.move_before(b, b);
        check(&list, &[1, 2, 3]);
    }

    #[test]
    fn test_remove_and_reuse() {
        let mut list = List::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.remove(b), 2);
        check(&list, &[1, 3]);

        // freed slot gets recycled
        let d = list.insert_after(4, a);
        assert_eq!(d, b);
        check(&list, &[1, 4, 3]);

        assert_eq!(list.remove(a), 1);
        assert_eq!(list.remove(c), 3);
        check(&list, &[4]);
        assert_eq!(list.front(), list.back());
    }

    #[test]
    fn test_pop() {
        let mut list = List::new();
        list.push_back(1);
        list.push_back(2);

        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), None);
        check(&list, &[]);
    }

    #[test]
    fn test_clear() {
        let mut list = List::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();
        check(&list, &[]);

        list.push_front(5);
        check(&list, &[5]);
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut list = List::with_capacity(16);
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);
        list.remove(c);
        list.remove(a);
        list.shrink_to_fit();

        check(&list, &[2]);
        assert_eq!(list.nodes.len(), 2);
        assert_eq!(list.free_list, vec![a]);

        list.push_back(4);
        list.push_back(5);
        check(&list, &[2, 4, 5]);
        assert_eq!(*list.get(b), 2);
    }
}
