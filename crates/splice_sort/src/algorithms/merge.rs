use std::cmp::Ordering;

use crate::limits::LeftLimit;
use crate::traits::Cosplice;

use super::common::{self, into_ok, less, step, step_after};

/// Merges the sorted coranges `(left, middle]` and `(middle, last]` and
/// returns the last element of the result.
pub(crate) fn merge_coranges<S, F, E>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    middle: S::Pos,
    last: S::Pos,
    is_less: &mut F,
) -> Result<S::Pos, E>
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
{
    if middle == last {
        return Ok(last);
    }
    let mut rhs = step(seq, middle);
    if !less(seq, is_less, rhs, middle)? {
        return Ok(last);
    }
    let stop = seq.next(last);

    // Right-hand runs are spliced between `dst` and `lhs`.
    let mut dst = left;
    let mut lhs = step_after(seq, left);
    loop {
        while !less(seq, is_less, rhs, lhs)? {
            dst = LeftLimit::At(lhs);
            lhs = step(seq, lhs);
        }

        let mut run_last = rhs;
        let rhs_next = loop {
            match seq.next(run_last) {
                Some(next) if Some(next) != stop => {
                    if !less(seq, is_less, next, lhs)? {
                        break Some(next);
                    }
                    run_last = next;
                }
                _ => break None,
            }
        };
        seq.cosplice(dst, LeftLimit::At(middle), run_last);

        let Some(next) = rhs_next else {
            return Ok(middle);
        };
        if lhs == middle || !less(seq, is_less, next, middle)? {
            return Ok(last);
        }
        dst = LeftLimit::At(lhs);
        lhs = step(seq, lhs);
        rhs = next;
    }
}

/// Stable in-place merge of the sorted coranges `(left, middle]` and
/// `(middle, last]`. Returns the last element of the merged corange.
///
/// Runs of the right half that land between the same two left elements are
/// moved with a single splice. Ties keep left elements first.
pub fn try_coinplace_merge_splice_by<S, F, E>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    middle: S::Pos,
    last: S::Pos,
    mut is_less: F,
) -> Result<S::Pos, E>
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
{
    merge_coranges(seq, left, middle, last, &mut is_less)
}

pub fn coinplace_merge_splice<S>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    middle: S::Pos,
    last: S::Pos,
) -> S::Pos
where
    S: Cosplice + ?Sized,
    S::Item: Ord,
{
    into_ok(try_coinplace_merge_splice_by(
        seq,
        left,
        middle,
        last,
        common::ord_less,
    ))
}

pub fn coinplace_merge_splice_by<S, F>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    middle: S::Pos,
    last: S::Pos,
    compare: F,
) -> S::Pos
where
    S: Cosplice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    into_ok(try_coinplace_merge_splice_by(
        seq,
        left,
        middle,
        last,
        common::less_by(compare),
    ))
}

pub fn coinplace_merge_splice_by_key<S, K, F>(
    seq: &mut S,
    left: LeftLimit<S::Pos>,
    middle: S::Pos,
    last: S::Pos,
    key: F,
) -> S::Pos
where
    S: Cosplice + ?Sized,
    K: Ord,
    F: FnMut(&S::Item) -> K,
{
    into_ok(try_coinplace_merge_splice_by(
        seq,
        left,
        middle,
        last,
        common::less_by_key(key),
    ))
}

/// Merges `(front, middle]` with everything after `middle`.
pub fn coinplace_merge_splice_at<S>(seq: &mut S, middle: S::Pos) -> S::Pos
where
    S: Cosplice + ?Sized,
    S::Item: Ord,
{
    let left = seq.before_begin();
    let last = seq.last().unwrap_or(middle);
    coinplace_merge_splice(seq, left, middle, last)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::algorithms::common::test_support::{
        left_at, on_each_shape, pos_at, random_keyed, stable_sorted,
    };
    use crate::containers::ForwardList;
    use crate::traits::Sequence;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted_halves(rng: &mut StdRng, len: usize, split: usize) -> Vec<u32> {
        let mut data: Vec<u32> = (0..len).map(|_| rng.random_range(0..8)).collect();
        data[..split].sort();
        data[split..].sort();
        data
    }

    #[test]
    fn merges_every_split_point() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for len in 1..=12 {
            for split in 1..=len {
                let data = sorted_halves(&mut rng, len, split);
                let expected = stable_sorted(&data);
                for (shape, actual, last) in on_each_shape!(data, |seq| {
                    let middle = pos_at(seq, split - 1);
                    let last = pos_at(seq, len - 1);
                    let merged_last = coinplace_merge_splice(seq, LeftLimit::Front, middle, last);
                    (*seq.get(merged_last), seq.next(merged_last).is_none())
                }) {
                    assert_eq!(actual, expected, "shape={shape} len={len} split={split}");
                    assert_eq!(last, (*expected.last().unwrap(), true), "shape={shape}");
                }
            }
        }
    }

    #[test]
    fn stable_between_halves() {
        let data = [(1, 'a'), (2, 'b'), (2, 'c'), (5, 'd'), (0, 'e'), (2, 'f'), (5, 'g'), (7, 'h')];
        for (shape, actual, _) in on_each_shape!(data, |seq| {
            let middle = pos_at(seq, 3);
            let last = pos_at(seq, 7);
            coinplace_merge_splice_by_key(seq, LeftLimit::Front, middle, last, |&(k, _)| k)
        }) {
            let tags: String = actual.iter().map(|&(_, c)| c).collect();
            assert_eq!(tags, "eabcfdgh", "shape={shape}");
        }
    }

    #[test]
    fn leaves_margins_untouched() {
        let data = [50_u32, 40, 1, 4, 9, 2, 3, 10, 30, 20];
        for (shape, actual, last) in on_each_shape!(data, |seq| {
            let left = left_at(seq, 2);
            let middle = pos_at(seq, 4);
            let last = pos_at(seq, 7);
            let merged = coinplace_merge_splice(seq, left, middle, last);
            *seq.get(merged)
        }) {
            assert_eq!(actual, vec![50, 40, 1, 2, 3, 4, 9, 10, 30, 20], "shape={shape}");
            assert_eq!(last, 10, "shape={shape}");
        }
    }

    #[test]
    fn already_ordered_halves_use_one_comparison() {
        let calls = Cell::new(0);
        let mut list: ForwardList<u32> = [1, 2, 3, 3, 4, 5].into_iter().collect();
        let middle = pos_at(&list, 2);
        let last = pos_at(&list, 5);
        let merged = coinplace_merge_splice_by(&mut list, LeftLimit::Front, middle, last, |a, b| {
            calls.set(calls.get() + 1);
            a.cmp(b)
        });
        assert_eq!(merged, last);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn empty_right_half_returns_last() {
        let mut list: ForwardList<u32> = [3, 1, 2].into_iter().collect();
        let last = pos_at(&list, 2);
        assert_eq!(coinplace_merge_splice(&mut list, LeftLimit::Front, last, last), last);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn right_run_moves_in_one_splice() {
        // 4..=6 all land between 3 and 7: the last left element ends the result.
        let mut list: ForwardList<u32> = [1, 3, 7, 4, 5, 6].into_iter().collect();
        let middle = pos_at(&list, 2);
        let last = pos_at(&list, 5);
        let merged = coinplace_merge_splice_at(&mut list, middle);
        assert_eq!(merged, middle);
        assert_eq!(list.last(), Some(middle));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 6, 7]);
        assert_eq!(list.next(last), Some(middle));
    }

    #[test]
    fn random_merges_match_stable_sort() {
        let mut rng = StdRng::seed_from_u64(0xD0D1_2026);
        for _ in 0..50 {
            let len = rng.random_range(2..300);
            let split = rng.random_range(1..len);
            let mut data = random_keyed(&mut rng, len, 20);
            data[..split].sort_by_key(|&(k, _)| k);
            data[split..].sort_by_key(|&(k, _)| k);
            let mut expected = data.clone();
            expected.sort_by_key(|&(k, _)| k);

            for (shape, actual, _) in on_each_shape!(data, |seq| {
                let middle = pos_at(seq, split - 1);
                let last = pos_at(seq, len - 1);
                coinplace_merge_splice_by(seq, LeftLimit::Front, middle, last, |a, b| a.0.cmp(&b.0))
            }) {
                assert_eq!(actual, expected, "shape={shape} len={len} split={split}");
            }
        }
    }

    #[test]
    fn comparator_error_keeps_every_element() {
        let data: Vec<u32> = (0..20).map(|i| 2 * i).chain((0..20).map(|i| 2 * i + 1)).collect();
        let mut list: ForwardList<u32> = data.iter().copied().collect();
        let middle = pos_at(&list, 19);
        let last = pos_at(&list, 39);
        let mut budget = 5;
        let result = try_coinplace_merge_splice_by(&mut list, LeftLimit::Front, middle, last, |a, b| {
            if budget == 0 {
                return Err(());
            }
            budget -= 1;
            Ok(a < b)
        });
        assert_eq!(result, Err(()));
        let mut actual: Vec<u32> = list.iter().copied().collect();
        actual.sort();
        assert_eq!(actual, stable_sorted(&data));
    }
}
