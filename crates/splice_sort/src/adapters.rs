//! Adapters exposing [`Cosplice`] over the other splice shapes.
//!
//! The algorithms only ever call `cosplice`. A sequence that natively offers
//! something else is wrapped once, at the call site:
//!
//! ```
//! use splice_sort::{List, ViaSplice, merge_sort_splice_all};
//!
//! let mut list: List<i32> = [3, 1, 2].into_iter().collect();
//! merge_sort_splice_all(&mut ViaSplice(&mut list));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```

use crate::limits::{LeftLimit, RightLimit};
use crate::traits::{Cosplice, ExactSize, Sequence, Splice, SpliceAfter};

/// Corange splicing through [`Splice`]: `(lt, rt]` after `pos` is
/// `[after(lt), next(rt))` before `after(pos)`.
pub struct ViaSplice<'a, S: ?Sized>(pub &'a mut S);

/// Corange splicing through [`SpliceAfter`]: `(lt, rt]` is the open span
/// `(lt, next(rt))`.
pub struct ViaSpliceAfter<'a, S: ?Sized>(pub &'a mut S);

macro_rules! forward_sequence {
    ($adapter:ident, $bound:ident) => {
        impl<S: $bound + ?Sized> Sequence for $adapter<'_, S> {
            type Item = S::Item;
            type Pos = S::Pos;

            #[inline]
            fn first(&self) -> Option<S::Pos> {
                self.0.first()
            }

            #[inline]
            fn next(&self, pos: S::Pos) -> Option<S::Pos> {
                self.0.next(pos)
            }

            #[inline]
            fn get(&self, pos: S::Pos) -> &S::Item {
                self.0.get(pos)
            }

            fn before_begin(&self) -> LeftLimit<S::Pos> {
                self.0.before_begin()
            }

            fn last(&self) -> Option<S::Pos> {
                self.0.last()
            }
        }

        impl<S: $bound + ExactSize + ?Sized> ExactSize for $adapter<'_, S> {
            fn len(&self) -> usize {
                self.0.len()
            }
        }
    };
}

forward_sequence!(ViaSplice, Splice);
forward_sequence!(ViaSpliceAfter, SpliceAfter);

impl<S: Splice + ?Sized> Cosplice for ViaSplice<'_, S> {
    fn cosplice(&mut self, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos) {
        if pos == lt {
            return;
        }
        let Some(first) = self.0.after(lt) else {
            panic!("empty corange after {lt:?}");
        };
        let last = RightLimit::from(self.0.next(rt));
        let dst = RightLimit::from(self.0.after(pos));
        self.0.splice(dst, first, last);
    }
}

impl<S: SpliceAfter + ?Sized> Cosplice for ViaSpliceAfter<'_, S> {
    fn cosplice(&mut self, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos) {
        let last = RightLimit::from(self.0.next(rt));
        self.0.splice_after(pos, lt, last);
    }
}
