use std::cmp::Ordering;
use std::convert::Infallible;

use crate::flat_list::{FlatList, Link};
use crate::limits::{LeftLimit, RightLimit};
use crate::traits::Cosplice;

use super::common::{self, into_ok, less};
use super::{merge, merge_sort};

/// Stable bucket sort of the span `(left, right]` using at most `N`
/// buckets of auxiliary state, kept inline on the stack.
///
/// `is_equiv` groups elements into classes and must be consistent with
/// `is_less`: elements that are neither less nor greater than each other
/// are equivalent, and classes occupy contiguous ranges of the order. One
/// forward pass gathers every class into its own bucket, splicing whole
/// runs of equivalent elements at once; each bucket is then merge sorted.
///
/// With more than `N` classes the extra elements pile up in the last
/// bucket, which is sorted and merged back at the end. The result is still
/// sorted and stable, only slower.
///
/// `right` is inclusive: `RightLimit::At(p)` sorts up to and including `p`,
/// `RightLimit::End` sorts through the end of the sequence. Returns the
/// number of sorted elements and the last of them; an empty span yields
/// `(0, after(left))`.
pub fn try_bucket_sort_splice_by<const N: usize, S, E>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    right: RightLimit<S::Pos>,
    mut is_equiv: impl FnMut(&S::Item, &S::Item) -> Result<bool, E>,
    mut is_less: impl FnMut(&S::Item, &S::Item) -> Result<bool, E>,
) -> Result<(usize, RightLimit<S::Pos>), E>
where
    S: Cosplice + ?Sized,
{
    const { assert!(N > 0, "bucket sort needs at least one bucket") };
    if N <= u8::MAX as usize {
        sort_buckets::<N, u8, _, _, _, _>(seq, left, right, &mut is_equiv, &mut is_less)
    } else if N <= u16::MAX as usize {
        sort_buckets::<N, u16, _, _, _, _>(seq, left, right, &mut is_equiv, &mut is_less)
    } else if N as u64 <= u32::MAX as u64 {
        sort_buckets::<N, u32, _, _, _, _>(seq, left, right, &mut is_equiv, &mut is_less)
    } else {
        sort_buckets::<N, usize, _, _, _, _>(seq, left, right, &mut is_equiv, &mut is_less)
    }
}

/// Bucket sort of an `Ord` sequence whose classes are the values of
/// `class`, which must be monotone in the element order (for example the
/// decade of a number).
pub fn bucket_sort_splice<const N: usize, S, C>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    right: RightLimit<S::Pos>,
    mut class: impl FnMut(&S::Item) -> C,
) -> (usize, RightLimit<S::Pos>)
where
    S: Cosplice + ?Sized,
    S::Item: Ord,
    C: Eq,
{
    into_ok(try_bucket_sort_splice_by::<N, _, _>(
        seq,
        left,
        right,
        |a, b| Ok::<_, Infallible>(class(a) == class(b)),
        common::ord_less,
    ))
}

pub fn bucket_sort_splice_by<const N: usize, S>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    right: RightLimit<S::Pos>,
    mut is_equiv: impl FnMut(&S::Item, &S::Item) -> bool,
    compare: impl FnMut(&S::Item, &S::Item) -> Ordering,
) -> (usize, RightLimit<S::Pos>)
where
    S: Cosplice + ?Sized,
{
    into_ok(try_bucket_sort_splice_by::<N, _, _>(
        seq,
        left,
        right,
        |a, b| Ok(is_equiv(a, b)),
        common::less_by(compare),
    ))
}

pub fn bucket_sort_splice_by_key<const N: usize, S, C, K>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    right: RightLimit<S::Pos>,
    mut class: impl FnMut(&S::Item) -> C,
    key: impl FnMut(&S::Item) -> K,
) -> (usize, RightLimit<S::Pos>)
where
    S: Cosplice + ?Sized,
    C: Eq,
    K: Ord,
{
    into_ok(try_bucket_sort_splice_by::<N, _, _>(
        seq,
        left,
        right,
        |a, b| Ok(class(a) == class(b)),
        common::less_by_key(key),
    ))
}

fn sort_buckets<const N: usize, L, S, Q, F, E>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    right: RightLimit<S::Pos>,
    is_equiv: &mut Q,
    is_less: &mut F,
) -> Result<(usize, RightLimit<S::Pos>), E>
where
    L: Link,
    S: Cosplice + ?Sized,
    Q: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
    F: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
{
    let first = match (left, right) {
        (LeftLimit::At(l), RightLimit::At(r)) if l == r => None,
        _ => seq.after(left),
    };
    let Some(first) = first else {
        return Ok((0, seq.after(left).into()));
    };
    // Fixed before any splice: nothing outside the span moves.
    let stop = match right {
        RightLimit::At(last) => seq.next(last),
        RightLimit::End => None,
    };

    // (count, last element) per bucket, in class order. The elements of a
    // bucket are contiguous and the buckets follow each other in the
    // sequence; the last bucket always ends at `lhs`.
    let mut buckets = FlatList::<(usize, S::Pos), N, L>::new();
    let mut last_bucket = buckets.emplace_after(buckets.before_begin(), (1, first));
    let mut overflowed = false;
    let mut lhs = first;

    while let Some(it) = seq.next(lhs).filter(|&it| Some(it) != stop) {
        let last_rep = buckets.get(last_bucket).1;
        if is_equiv(seq.get(it), seq.get(last_rep))? {
            let bucket = buckets.get_mut(last_bucket);
            bucket.0 += 1;
            bucket.1 = it;
            lhs = it;
            continue;
        }

        if less(seq, is_less, last_rep, it)? {
            if buckets.is_full() {
                overflowed = true;
                let bucket = buckets.get_mut(last_bucket);
                bucket.0 += 1;
                bucket.1 = it;
            } else {
                last_bucket = buckets.emplace_after(last_bucket, (1, it));
            }
            lhs = it;
            continue;
        }

        // The maximal run of elements equivalent to `it`.
        let mut it_last = it;
        let mut run = 1;
        while let Some(next) = seq.next(it_last).filter(|&next| Some(next) != stop) {
            if !is_equiv(seq.get(it), seq.get(next))? {
                break;
            }
            it_last = next;
            run += 1;
        }

        // Home bucket of the run, or the bucket to create it after.
        let mut prev = buckets.before_begin();
        let mut cur = buckets.begin();
        let mut home = None;
        while cur != last_bucket {
            let rep = buckets.get(cur).1;
            if is_equiv(seq.get(it), seq.get(rep))? {
                home = Some(cur);
                break;
            }
            if less(seq, is_less, it, rep)? {
                break;
            }
            prev = cur;
            cur = buckets.next(cur);
        }

        match home {
            Some(bucket) => {
                let (count, rep) = *buckets.get(bucket);
                seq.cosplice(LeftLimit::At(rep), LeftLimit::At(lhs), it_last);
                *buckets.get_mut(bucket) = (count + run, it_last);
            }
            None if buckets.is_full() => {
                overflowed = true;
                buckets.get_mut(last_bucket).0 += run;
                lhs = it_last;
            }
            None => {
                let dst = if prev == buckets.before_begin() {
                    left
                } else {
                    LeftLimit::At(buckets.get(prev).1)
                };
                seq.cosplice(dst, LeftLimit::At(lhs), it_last);
                buckets.emplace_after(prev, (run, it_last));
            }
        }
    }

    let mut total = 0;
    let mut before = left;
    // Last element of the buckets already sorted; `left` itself is outside
    // the span and never part of the prefix.
    let mut prefix_last = None;
    let mut last = first;
    let mut cur = buckets.begin();
    while cur != buckets.end() {
        let count = buckets.get(cur).0;
        last = merge_sort::sort_corange(seq, before, count, is_less)?;
        if overflowed && cur == last_bucket {
            log::trace!("bucket capacity {N} exceeded, merging {count} overflow elements");
            if let Some(prefix_last) = prefix_last {
                last = merge::merge_coranges(seq, left, prefix_last, last, is_less)?;
            }
        }
        total += count;
        before = LeftLimit::At(last);
        prefix_last = Some(last);
        cur = buckets.next(cur);
    }
    Ok((total, RightLimit::At(last)))
}
