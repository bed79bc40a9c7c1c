use std::cmp::Ordering;

use crate::limits::{LeftLimit, RightLimit};
use crate::traits::{Cosplice, ExactSize};

use super::common::{self, into_ok, less, step, step_after};

/// Sorts the `count` elements following `left` and returns the last one.
/// `count` must be at least 1.
pub(crate) fn sort_corange<S, F, E>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
    is_less: &mut F,
) -> Result<S::Pos, E>
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
{
    debug_assert!(count > 0);
    let mut first = step_after(seq, left);
    // `first..=last` is sorted; `last` is its maximum.
    let mut last = first;

    for _ in 1..count {
        let rhs = step(seq, last);
        if !less(seq, is_less, rhs, last)? {
            last = rhs;
            continue;
        }

        if first == last || less(seq, is_less, rhs, first)? {
            seq.cosplice_one(left, LeftLimit::At(last));
            first = rhs;
            continue;
        }

        // The last element not greater than `rhs`; the scan stops before `last`.
        let mut pos = first;
        loop {
            let next = step(seq, pos);
            if less(seq, is_less, rhs, next)? {
                break;
            }
            pos = next;
        }
        seq.cosplice_one(LeftLimit::At(pos), LeftLimit::At(last));
    }
    Ok(last)
}

/// Stable insertion sort of the `count` elements following `left`.
///
/// Returns the last element of the sorted span, or `after(left)` when
/// `count` is zero. A single element is returned without calling `is_less`.
///
/// # Panics
///
/// If fewer than `count` elements follow `left`.
pub fn try_insertion_sort_splice_by<S, F, E>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
    mut is_less: F,
) -> Result<RightLimit<S::Pos>, E>
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
{
    if count == 0 {
        return Ok(seq.after(left).into());
    }
    sort_corange(seq, left, count, &mut is_less).map(RightLimit::At)
}

pub fn insertion_sort_splice<S>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
) -> RightLimit<S::Pos>
where
    S: Cosplice + ?Sized,
    S::Item: Ord,
{
    into_ok(try_insertion_sort_splice_by(seq, left, count, common::ord_less))
}

pub fn insertion_sort_splice_by<S, F>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
    compare: F,
) -> RightLimit<S::Pos>
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    into_ok(try_insertion_sort_splice_by(
        seq,
        left,
        count,
        common::less_by(compare),
    ))
}

pub fn insertion_sort_splice_by_key<S, K, F>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
    key: F,
) -> RightLimit<S::Pos>
where
    S: Cosplice + ?Sized,
    K: Ord,
    F: FnMut(&S::Item) -> K,
{
    into_ok(try_insertion_sort_splice_by(
        seq,
        left,
        count,
        common::less_by_key(key),
    ))
}

/// Sorts the whole sequence.
pub fn insertion_sort_splice_all<S>(seq: &mut S) -> RightLimit<S::Pos>
where
    S: Cosplice + ExactSize + ?Sized,
    S::Item: Ord,
{
    let left = seq.before_begin();
    let count = seq.len();
    insertion_sort_splice(seq, left, count)
}
