use std::cmp::Ordering;
use std::convert::Infallible;

use crate::limits::LeftLimit;
use crate::traits::Sequence;

#[inline(always)]
pub(crate) fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// `next(pos)`, for positions the caller's count promises are not last.
#[inline]
#[track_caller]
pub(crate) fn step<S: Sequence + ?Sized>(seq: &S, pos: S::Pos) -> S::Pos {
    match seq.next(pos) {
        Some(next) => next,
        None => panic!("sequence ended after {pos:?} before the requested count"),
    }
}

#[inline]
#[track_caller]
pub(crate) fn step_after<S: Sequence + ?Sized>(seq: &S, left: LeftLimit<S::Pos>) -> S::Pos {
    match seq.after(left) {
        Some(first) => first,
        None => panic!("nothing follows {left:?} but the requested count is not zero"),
    }
}

#[inline(always)]
pub(crate) fn less<S, F, E>(seq: &S, is_less: &mut F, a: S::Pos, b: S::Pos) -> Result<bool, E>
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<bool, E>,
{
    is_less(seq.get(a), seq.get(b))
}

pub(crate) fn ord_less<T: Ord>(a: &T, b: &T) -> Result<bool, Infallible> {
    Ok(a < b)
}

pub(crate) fn less_by<T, F>(mut compare: F) -> impl FnMut(&T, &T) -> Result<bool, Infallible>
where
    F: FnMut(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| Ok(compare(a, b) == Ordering::Less)
}

pub(crate) fn less_by_key<T, K, F>(mut key: F) -> impl FnMut(&T, &T) -> Result<bool, Infallible>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    move |a: &T, b: &T| Ok(key(a) < key(b))
}
