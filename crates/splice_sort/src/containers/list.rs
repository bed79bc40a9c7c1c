use std::fmt;
use std::iter::FusedIterator;

use super::{NIL, NodeId, link_to_pos};
use crate::limits::RightLimit;
use crate::traits::{ExactSize, Sequence, Splice};

#[derive(Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

/// Doubly-linked list over a growable arena.
///
/// Only offers the classic "move `[first, last)` before `pos`" splice; wrap
/// it in [`ViaSplice`](crate::ViaSplice) to sort it.
#[derive(Clone)]
pub struct List<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_back(&mut self, value: T) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: NIL,
            next: NIL,
        });
        self.link(self.tail, idx);
        self.link(idx, NIL);
        NodeId(idx)
    }

    pub fn push_front(&mut self, value: T) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: NIL,
            next: NIL,
        });
        self.link(idx, self.head);
        self.link(NIL, idx);
        NodeId(idx)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    pub fn get_mut(&mut self, pos: NodeId) -> &mut T {
        &mut self.nodes[pos.index()].value
    }

    pub fn prev(&self, pos: NodeId) -> Option<NodeId> {
        link_to_pos(self.nodes[pos.index()].prev)
    }

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
            remaining: self.nodes.len(),
        }
    }

    /// Makes `b` follow `a`; `NIL` on either side stands for the list ends.
    #[inline]
    fn link(&mut self, a: usize, b: usize) {
        match a {
            NIL => self.head = b,
            a => self.nodes[a].next = b,
        }
        match b {
            NIL => self.tail = a,
            b => self.nodes[b].prev = a,
        }
    }
}

impl<T> Sequence for List<T> {
    type Item = T;
    type Pos = NodeId;

    fn first(&self) -> Option<NodeId> {
        link_to_pos(self.head)
    }

    fn next(&self, pos: NodeId) -> Option<NodeId> {
        link_to_pos(self.nodes[pos.index()].next)
    }

    fn get(&self, pos: NodeId) -> &T {
        &self.nodes[pos.index()].value
    }

    fn last(&self) -> Option<NodeId> {
        link_to_pos(self.tail)
    }
}

impl<T> ExactSize for List<T> {
    fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> Splice for List<T> {
    fn splice(&mut self, pos: RightLimit<NodeId>, first: NodeId, last: RightLimit<NodeId>) {
        if pos == RightLimit::At(first) || pos == last {
            return;
        }
        let (span_last, rest) = match last {
            RightLimit::At(last) => (self.nodes[last.index()].prev, last.index()),
            RightLimit::End => (self.tail, NIL),
        };
        let first = first.index();
        let before = self.nodes[first].prev;
        self.link(before, rest);

        let (dst_prev, dst) = match pos {
            RightLimit::At(pos) => (self.nodes[pos.index()].prev, pos.index()),
            RightLimit::End => (self.tail, NIL),
        };
        self.link(dst_prev, first);
        self.link(span_last, dst);
    }
}

pub struct Iter<'a, T> {
    list: &'a List<T>,
    cur: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cur == NIL {
            return None;
        }
        let node = &self.list.nodes[self.cur];
        self.cur = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
