use std::fmt::Debug;

use crate::limits::{LeftLimit, RightLimit};

/// A forward-traversable sequence addressed by opaque positions.
///
/// - `first` is `None` for an empty sequence.
/// - `next` returns `None` past the last element.
/// - `get` may panic on a position that does not belong to the sequence.
pub trait Sequence {
    type Item;
    type Pos: Copy + Eq + Debug;

    fn first(&self) -> Option<Self::Pos>;

    fn next(&self, pos: Self::Pos) -> Option<Self::Pos>;

    fn get(&self, pos: Self::Pos) -> &Self::Item;

    fn before_begin(&self) -> LeftLimit<Self::Pos> {
        LeftLimit::Front
    }

    /// Position immediately following the given left limit.
    fn after(&self, left: LeftLimit<Self::Pos>) -> Option<Self::Pos> {
        match left {
            LeftLimit::Front => self.first(),
            LeftLimit::At(pos) => self.next(pos),
        }
    }

    fn last(&self) -> Option<Self::Pos> {
        let mut pos = self.first()?;
        while let Some(next) = self.next(pos) {
            pos = next;
        }
        Some(pos)
    }
}

pub trait ExactSize: Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Corange splicing within one sequence. This is the only relinking
/// primitive the sorting algorithms use.
pub trait Cosplice: Sequence {
    /// Moves `(lt, rt]` right after `pos`, keeping its order.
    ///
    /// `pos` must not lie inside `(lt, rt]`; `pos == lt` leaves the sequence
    /// unchanged. Positions outside the moved span stay valid.
    fn cosplice(&mut self, pos: LeftLimit<Self::Pos>, lt: LeftLimit<Self::Pos>, rt: Self::Pos);

    /// Moves the element following `it` right after `pos`.
    fn cosplice_one(&mut self, pos: LeftLimit<Self::Pos>, it: LeftLimit<Self::Pos>) {
        if let Some(rt) = self.after(it) {
            self.cosplice(pos, it, rt);
        }
    }
}

/// Corange splicing between two sequences of the same type.
pub trait CospliceFrom: Sequence + Sized {
    /// Removes `(lt, rt]` from `src` and inserts it after `pos` in `self`.
    /// Returns the position of the last moved element in `self`.
    fn cosplice_from(
        &mut self,
        pos: LeftLimit<Self::Pos>,
        src: &mut Self,
        lt: LeftLimit<Self::Pos>,
        rt: Self::Pos,
    ) -> Self::Pos;
}

/// Classic splicing: moves `[first, last)` right before `pos`.
pub trait Splice: Sequence {
    fn splice(&mut self, pos: RightLimit<Self::Pos>, first: Self::Pos, last: RightLimit<Self::Pos>);

    fn splice_one(&mut self, pos: RightLimit<Self::Pos>, it: Self::Pos) {
        let last = RightLimit::from(self.next(it));
        self.splice(pos, it, last);
    }
}

/// Singly-linked splicing: moves the open span `(first, last)` right after
/// `pos`. Implementations may need to walk the span to find its end.
pub trait SpliceAfter: Sequence {
    fn splice_after(
        &mut self,
        pos: LeftLimit<Self::Pos>,
        first: LeftLimit<Self::Pos>,
        last: RightLimit<Self::Pos>,
    );
}
