//! Arena-backed linked lists that satisfy the splice contract.
//!
//! Nodes never move inside their arena, so a [`NodeId`] stays valid across
//! every splice. Using a position after the element was popped, or with a
//! different list, panics or yields an unrelated element.

mod forward_list;
mod list;

pub use forward_list::{ForwardList, Iter as ForwardListIter};
pub use list::{Iter as ListIter, List};

const NIL: usize = usize::MAX;

/// Position of an element in a [`ForwardList`] or a [`List`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

#[inline]
fn link_to_pos(link: usize) -> Option<NodeId> {
    (link != NIL).then_some(NodeId(link))
}
