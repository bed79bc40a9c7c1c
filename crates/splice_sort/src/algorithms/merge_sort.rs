use std::cmp::Ordering;

use crate::TUNED_PARAMS;
use crate::limits::{LeftLimit, RightLimit};
use crate::traits::{Cosplice, ExactSize};

use super::common::{self, into_ok};
use super::{insertion_sort, merge};

/// Levels below this one are left to insertion sort.
const FIRST_STEP: u32 = TUNED_PARAMS.insertion_threshold.trailing_zeros();

/// Sorts the `count` elements following `left` and returns the last one.
/// `count` must be at least 1.
///
/// With `L` the bit length of `count` and `S(k) = count >> (L - k)`, the
/// first `S(FIRST_STEP)` elements are insertion sorted, then each level `k`
/// sorts the next `S(k + 1) - S(k)` elements recursively and merges them
/// into the prefix. Every merge joins blocks of nearly equal size.
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
    let steps = usize::BITS - count.leading_zeros();
    let mut sorted = if steps <= FIRST_STEP {
        count
    } else {
        count >> (steps - FIRST_STEP)
    };
    let mut last = insertion_sort::sort_corange(seq, left, sorted, is_less)?;

    for step in FIRST_STEP..steps {
        let target = count >> (steps - step - 1);
        let right = sort_corange(seq, LeftLimit::At(last), target - sorted, is_less)?;
        last = merge::merge_coranges(seq, left, last, right, is_less)?;
        sorted = target;
    }
    Ok(last)
}

/// Stable merge sort of the `count` elements following `left`, in
/// O(count log count) comparisons and splices with no allocation.
///
/// Returns the last element of the sorted span, or `after(left)` when
/// `count` is zero.
///
/// # Panics
///
/// If fewer than `count` elements follow `left`.
pub fn try_merge_sort_splice_by<S, F, E>(
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

pub fn merge_sort_splice<S>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
) -> RightLimit<S::Pos>
where
    S: Cosplice + ?Sized,
    S::Item: Ord,
{
    into_ok(try_merge_sort_splice_by(seq, left, count, common::ord_less))
}

pub fn merge_sort_splice_by<S, F>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    count: usize,
    compare: F,
) -> RightLimit<S::Pos>
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    into_ok(try_merge_sort_splice_by(
        seq,
        left,
        count,
        common::less_by(compare),
    ))
}

pub fn merge_sort_splice_by_key<S, K, F>(
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
    into_ok(try_merge_sort_splice_by(
        seq,
        left,
        count,
        common::less_by_key(key),
    ))
}

/// Sorts the whole sequence.
pub fn merge_sort_splice_all<S>(seq: &mut S) -> RightLimit<S::Pos>
where
    S: Cosplice + ExactSize + ?Sized,
    S::Item: Ord,
{
    let left = seq.before_begin();
    let count = seq.len();
    merge_sort_splice(seq, left, count)
}
