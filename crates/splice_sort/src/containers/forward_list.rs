use std::fmt;
use std::iter::FusedIterator;

use super::{NIL, NodeId, link_to_pos};
use crate::limits::{LeftLimit, RightLimit};
use crate::traits::{Cosplice, CospliceFrom, ExactSize, Sequence, SpliceAfter};

#[derive(Clone)]
struct Node<T> {
    value: Option<T>,
    next: usize,
}

/// Singly-linked list over a growable arena with a free list.
///
/// Supports the corange splice natively in O(1), which makes it the
/// reference shape for the sorting algorithms.
#[derive(Clone)]
pub struct ForwardList<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
    len: usize,
    free: usize,
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ForwardList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            len: 0,
            free: NIL,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_front(&mut self, value: T) -> NodeId {
        self.insert_after(LeftLimit::Front, value)
    }

    pub fn push_back(&mut self, value: T) -> NodeId {
        let pos = match self.tail {
            NIL => LeftLimit::Front,
            tail => LeftLimit::At(NodeId(tail)),
        };
        self.insert_after(pos, value)
    }

    /// Inserts `value` right after `pos` and returns its position.
    pub fn insert_after(&mut self, pos: LeftLimit<NodeId>, value: T) -> NodeId {
        let idx = self.alloc(value);
        let next = self.link_after(pos);
        self.nodes[idx].next = next;
        self.set_link_after(pos, idx);
        if next == NIL {
            self.tail = idx;
        }
        self.len += 1;
        NodeId(idx)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.head == NIL {
            return None;
        }
        let idx = self.head;
        self.head = self.nodes[idx].next;
        if self.head == NIL {
            self.tail = NIL;
        }
        self.len -= 1;
        Some(self.release(idx))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
        self.free = NIL;
    }

    pub fn front(&self) -> Option<&T> {
        link_to_pos(self.head).map(|pos| self.value(pos))
    }

    pub fn get_mut(&mut self, pos: NodeId) -> &mut T {
        match self.nodes.get_mut(pos.index()).and_then(|node| node.value.as_mut()) {
            Some(value) => value,
            None => panic!("{pos:?} does not refer to a live element"),
        }
    }

    /// Position of the `index`-th element, walking from the front.
    pub fn position(&self, index: usize) -> Option<NodeId> {
        let mut pos = link_to_pos(self.head)?;
        for _ in 0..index {
            pos = link_to_pos(self.nodes[pos.index()].next)?;
        }
        Some(pos)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cur: self.head,
            remaining: self.len,
        }
    }

    fn value(&self, pos: NodeId) -> &T {
        match self.nodes.get(pos.index()).and_then(|node| node.value.as_ref()) {
            Some(value) => value,
            None => panic!("{pos:?} does not refer to a live element"),
        }
    }

    fn alloc(&mut self, value: T) -> usize {
        if self.free == NIL {
            self.nodes.push(Node {
                value: Some(value),
                next: NIL,
            });
            return self.nodes.len() - 1;
        }
        let idx = self.free;
        self.free = self.nodes[idx].next;
        self.nodes[idx] = Node {
            value: Some(value),
            next: NIL,
        };
        idx
    }

    fn release(&mut self, idx: usize) -> T {
        let node = &mut self.nodes[idx];
        let Some(value) = node.value.take() else {
            panic!("node {idx} released twice");
        };
        node.next = self.free;
        self.free = idx;
        value
    }

    #[inline]
    fn link_after(&self, left: LeftLimit<NodeId>) -> usize {
        match left {
            LeftLimit::Front => self.head,
            LeftLimit::At(pos) => self.nodes[pos.index()].next,
        }
    }

    #[inline]
    fn set_link_after(&mut self, left: LeftLimit<NodeId>, to: usize) {
        match left {
            LeftLimit::Front => self.head = to,
            LeftLimit::At(pos) => self.nodes[pos.index()].next = to,
        }
    }

    /// Unlinks `(lt, rt]` and returns its first node. Length is untouched.
    fn detach(&mut self, lt: LeftLimit<NodeId>, rt: NodeId) -> usize {
        let first = self.link_after(lt);
        let rest = self.nodes[rt.index()].next;
        self.set_link_after(lt, rest);
        if self.tail == rt.index() {
            self.tail = match lt {
                LeftLimit::Front => NIL,
                LeftLimit::At(pos) => pos.index(),
            };
        }
        first
    }
}

impl<T> Sequence for ForwardList<T> {
    type Item = T;
    type Pos = NodeId;

    fn first(&self) -> Option<NodeId> {
        link_to_pos(self.head)
    }

    fn next(&self, pos: NodeId) -> Option<NodeId> {
        link_to_pos(self.nodes[pos.index()].next)
    }

    fn get(&self, pos: NodeId) -> &T {
        self.value(pos)
    }

    fn last(&self) -> Option<NodeId> {
        link_to_pos(self.tail)
    }
}

impl<T> ExactSize for ForwardList<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Cosplice for ForwardList<T> {
    fn cosplice(&mut self, pos: LeftLimit<NodeId>, lt: LeftLimit<NodeId>, rt: NodeId) {
        let first = self.detach(lt, rt);
        let next = self.link_after(pos);
        self.set_link_after(pos, first);
        self.nodes[rt.index()].next = next;
        if next == NIL {
            self.tail = rt.index();
        }
    }
}

impl<T> SpliceAfter for ForwardList<T> {
    fn splice_after(
        &mut self,
        pos: LeftLimit<NodeId>,
        first: LeftLimit<NodeId>,
        last: RightLimit<NodeId>,
    ) {
        let stop = match last {
            RightLimit::At(pos) => pos.index(),
            RightLimit::End => NIL,
        };
        let mut rt = self.link_after(first);
        if rt == stop {
            return;
        }
        // Finding the node before `last` is what the corange splice avoids.
        while self.nodes[rt].next != stop {
            rt = self.nodes[rt].next;
        }
        self.cosplice(pos, first, NodeId(rt));
    }
}

/// Each list owns its own arena, so the span is moved value by value:
/// O(span), and the moved elements get new positions in `self`. Positions
/// of all other elements in both lists stay valid.
impl<T> CospliceFrom for ForwardList<T> {
    fn cosplice_from(
        &mut self,
        pos: LeftLimit<NodeId>,
        src: &mut Self,
        lt: LeftLimit<NodeId>,
        rt: NodeId,
    ) -> NodeId {
        let mut cur = src.detach(lt, rt);
        let mut anchor = pos;
        loop {
            let next = src.nodes[cur].next;
            let value = src.release(cur);
            src.len -= 1;
            let moved = self.insert_after(anchor, value);
            if cur == rt.index() {
                return moved;
            }
            anchor = LeftLimit::At(moved);
            cur = next;
        }
    }
}

pub struct Iter<'a, T> {
    list: &'a ForwardList<T>,
    cur: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let pos = link_to_pos(self.cur)?;
        self.cur = self.list.nodes[self.cur].next;
        self.remaining -= 1;
        Some(self.list.value(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for ForwardList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: PartialEq> PartialEq for ForwardList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ForwardList<T> {}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardList;
    use crate::limits::{LeftLimit, RightLimit};
    use crate::traits::{Cosplice, CospliceFrom, ExactSize, Sequence, SpliceAfter};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn contents<T: Clone>(list: &ForwardList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    fn left_at(list: &ForwardList<u32>, index: usize) -> LeftLimit<super::NodeId> {
        match index {
            0 => LeftLimit::Front,
            i => LeftLimit::At(list.position(i - 1).unwrap()),
        }
    }

    #[test]
    fn push_pop_and_positions() {
        let mut list = ForwardList::new();
        let b = list.push_back(2);
        let a = list.push_front(1);
        let c = list.push_back(3);
        assert_eq!(contents(&list), vec![1, 2, 3]);
        assert_eq!(list.first(), Some(a));
        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.last(), Some(c));
        assert_eq!(list.position(2), Some(c));
        assert_eq!(list.position(3), None);

        *list.get_mut(b) = 20;
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(*list.get(b), 20);
        assert_eq!(ExactSize::len(&list), 2);

        // The freed slot is reused without disturbing live positions.
        let d = list.push_front(0);
        assert_eq!(d, a);
        assert_eq!(contents(&list), vec![0, 20, 3]);
        assert_eq!(list.last(), Some(c));
    }

    #[test]
    #[should_panic]
    fn stale_position_panics() {
        let mut list = ForwardList::new();
        let a = list.push_back(1);
        list.pop_front();
        let _ = list.get(a);
    }

    #[test]
    fn cosplice_moves_coranges() {
        let mut list: ForwardList<u32> = (0..6).collect();
        let p1 = list.position(1).unwrap();
        let p3 = list.position(3).unwrap();
        let p5 = list.position(5).unwrap();

        // (1, 3] to the front
        list.cosplice(LeftLimit::Front, LeftLimit::At(p1), p3);
        assert_eq!(contents(&list), vec![2, 3, 0, 1, 4, 5]);

        // tail moves and the new tail is tracked
        let p4 = list.position(4).unwrap();
        list.cosplice(LeftLimit::At(p3), LeftLimit::At(p4), p5);
        assert_eq!(contents(&list), vec![2, 3, 5, 0, 1, 4]);
        assert_eq!(*list.get(list.last().unwrap()), 4);

        // after itself: unchanged
        list.cosplice(LeftLimit::At(p3), LeftLimit::At(p3), p5);
        assert_eq!(contents(&list), vec![2, 3, 5, 0, 1, 4]);

        // single element to the end
        list.cosplice_one(LeftLimit::At(list.last().unwrap()), LeftLimit::Front);
        assert_eq!(contents(&list), vec![3, 5, 0, 1, 4, 2]);
        assert_eq!(*list.get(list.last().unwrap()), 2);
    }

    #[test]
    fn random_cosplice_matches_vec() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut list: ForwardList<u32> = (0..40).collect();
        let mut vec: Vec<u32> = (0..40).collect();

        for _ in 0..2000 {
            let lt = rng.random_range(0..vec.len());
            let rt = rng.random_range(lt + 1..=vec.len());
            let span: Vec<u32> = vec.drain(lt..rt).collect();
            let dst = rng.random_range(0..=vec.len());

            let pos = left_at(&list, if dst > lt { dst + span.len() } else { dst });
            let lt_limit = left_at(&list, lt);
            let rt_pos = list.position(rt - 1).unwrap();
            list.cosplice(pos, lt_limit, rt_pos);

            for (i, value) in span.into_iter().enumerate() {
                vec.insert(dst + i, value);
            }
            assert_eq!(contents(&list), vec);
            assert_eq!(list.get(list.last().unwrap()), vec.last().unwrap());
        }
    }

    #[test]
    fn splice_after_moves_open_span() {
        let mut list: ForwardList<u32> = (0..6).collect();
        let p0 = list.position(0).unwrap();
        let p4 = list.position(4).unwrap();

        // (0, 4) = {1, 2, 3} after the last element
        let last = list.last().unwrap();
        list.splice_after(LeftLimit::At(last), LeftLimit::At(p0), RightLimit::At(p4));
        assert_eq!(contents(&list), vec![0, 4, 5, 1, 2, 3]);

        // empty span
        list.splice_after(LeftLimit::Front, LeftLimit::At(p0), RightLimit::At(p4));
        assert_eq!(contents(&list), vec![0, 4, 5, 1, 2, 3]);

        // (4, end) to the front
        list.splice_after(LeftLimit::Front, LeftLimit::At(p4), RightLimit::End);
        assert_eq!(contents(&list), vec![5, 1, 2, 3, 0, 4]);
        assert_eq!(list.last(), Some(p4));
    }

    #[test]
    fn cosplice_from_moves_between_lists() {
        let mut src: ForwardList<u32> = (0..6).collect();
        let mut dst: ForwardList<u32> = (10..13).collect();
        let kept = src.position(5).unwrap();
        let lt = src.position(1).unwrap();
        let rt = src.position(3).unwrap();

        let p10 = dst.position(0).unwrap();
        let p11 = dst.position(1).unwrap();
        let moved_last = dst.cosplice_from(LeftLimit::At(p10), &mut src, LeftLimit::At(lt), rt);

        assert_eq!(contents(&src), vec![0, 1, 4, 5]);
        assert_eq!(contents(&dst), vec![10, 2, 3, 11, 12]);
        assert_eq!(*dst.get(moved_last), 3);
        assert_eq!(*src.get(kept), 5);
        assert_eq!((*dst.get(p10), *dst.get(p11)), (10, 11));
        assert_eq!(dst.next(p10).map(|p| *dst.get(p)), Some(2));
        assert_eq!(src.len(), 4);
        assert_eq!(dst.len(), 5);

        // whole list onto the end of another
        let src_last = src.last().unwrap();
        let dst_last = dst.last().unwrap();
        let moved_last = dst.cosplice_from(LeftLimit::At(dst_last), &mut src, LeftLimit::Front, src_last);
        assert!(src.is_empty());
        assert_eq!(src.last(), None);
        assert_eq!(contents(&dst), vec![10, 2, 3, 11, 12, 0, 1, 4, 5]);
        assert_eq!(dst.last(), Some(moved_last));

        src.push_back(7);
        assert_eq!(contents(&src), vec![7]);
    }

    #[test]
    fn debug_and_eq() {
        let list: ForwardList<i32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(format!("{list:?}"), "[3, 1, 2]");
        assert_eq!(list.clone(), list);
        let mut other = list.clone();
        other.clear();
        assert!(other.is_empty());
        assert_ne!(other, list);
    }
}
