//! Left and right limits of spans inside a [`Sequence`](crate::Sequence).
//!
//! A *corange* `(left, right]` is the dual of the usual half-open range: it
//! starts strictly after a left limit and ends at (and includes) a
//! dereferenceable position. Since the left bound is exclusive, a corange can
//! be spliced in a singly-linked sequence without looking for the element
//! before its first one.

/// Lower bound of a span: everything strictly after it is in scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeftLimit<P> {
    /// Synthetic position preceding the first element. Never dereferenceable.
    Front,
    At(P),
}

/// Upper bound of a span, or a position that may be past the end.
///
/// As the upper bound of a span, `At(p)` includes `p` and `End` extends the
/// span through the last element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RightLimit<P> {
    At(P),
    End,
}

impl<P> LeftLimit<P> {
    pub fn position(self) -> Option<P> {
        match self {
            Self::Front => None,
            Self::At(pos) => Some(pos),
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, Self::Front)
    }
}

impl<P> RightLimit<P> {
    pub fn position(self) -> Option<P> {
        match self {
            Self::At(pos) => Some(pos),
            Self::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl<P> From<P> for LeftLimit<P> {
    fn from(pos: P) -> Self {
        Self::At(pos)
    }
}

impl<P> From<P> for RightLimit<P> {
    fn from(pos: P) -> Self {
        Self::At(pos)
    }
}

impl<P> From<Option<P>> for RightLimit<P> {
    fn from(pos: Option<P>) -> Self {
        match pos {
            Some(pos) => Self::At(pos),
            None => Self::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LeftLimit, RightLimit};
    use crate::containers::ForwardList;
    use crate::traits::Sequence;

    #[test]
    fn front_marker_precedes_first() {
        let mut list = ForwardList::new();
        let front = list.before_begin();
        assert!(front.is_front());
        assert_eq!(list.after(front), None);

        let a = list.push_front(42);
        assert_eq!(list.after(front), Some(a));
        assert_eq!(list.after(list.before_begin()), list.first());

        let b = list.push_front(7);
        assert_eq!(list.after(front), Some(b));
        assert_eq!(list.after(LeftLimit::At(b)), Some(a));
        assert_eq!(list.after(LeftLimit::At(a)), None);
    }

    #[test]
    fn limit_conversions() {
        assert_eq!(LeftLimit::from(3), LeftLimit::At(3));
        assert_eq!(RightLimit::from(Some(5)), RightLimit::At(5));
        assert_eq!(RightLimit::<u32>::from(None), RightLimit::End);
        assert_eq!(RightLimit::At(1).position(), Some(1));
        assert_eq!(RightLimit::<u8>::End.position(), None);
        assert_eq!(LeftLimit::<u8>::Front.position(), None);
        assert!(RightLimit::<u8>::End.is_end());
        assert_ne!(LeftLimit::Front, LeftLimit::At(0));
    }
}
