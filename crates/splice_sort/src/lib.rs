//! Stable sorting of linked sequences by relinking alone.
//!
//! Every algorithm here reorders elements exclusively through
//! [`Cosplice::cosplice`], never moving, copying or swapping values, so it
//! works on any sequence whose sub-ranges can be relinked cheaply. Spans are
//! described as coranges `(left, right]` (see [`limits`]).

pub mod adapters;
pub mod algorithms;
pub mod containers;
pub mod flat_list;
pub mod limits;
pub mod traits;

pub use adapters::{ViaSplice, ViaSpliceAfter};
pub use algorithms::bucket_sort::{
    bucket_sort_splice, bucket_sort_splice_by, bucket_sort_splice_by_key,
    try_bucket_sort_splice_by,
};
pub use algorithms::insertion_sort::{
    insertion_sort_splice, insertion_sort_splice_all, insertion_sort_splice_by,
    insertion_sort_splice_by_key, try_insertion_sort_splice_by,
};
pub use algorithms::merge::{
    coinplace_merge_splice, coinplace_merge_splice_at, coinplace_merge_splice_by,
    coinplace_merge_splice_by_key, try_coinplace_merge_splice_by,
};
pub use algorithms::merge_sort::{
    merge_sort_splice, merge_sort_splice_all, merge_sort_splice_by, merge_sort_splice_by_key,
    try_merge_sort_splice_by,
};
pub use containers::{ForwardList, List, NodeId};
pub use flat_list::{FlatList, Link};
pub use limits::{LeftLimit, RightLimit};
pub use traits::{Cosplice, CospliceFrom, ExactSize, Sequence, Splice, SpliceAfter};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SpliceAlgorithm {
    InsertionSort,
    MergeSort,
    BucketSort,
}

pub const ALL_ALGORITHMS: [SpliceAlgorithm; 3] = [
    SpliceAlgorithm::InsertionSort,
    SpliceAlgorithm::MergeSort,
    SpliceAlgorithm::BucketSort,
];

pub fn all_algorithms() -> &'static [SpliceAlgorithm] {
    &ALL_ALGORITHMS
}

pub fn algorithm_name(algo: SpliceAlgorithm) -> &'static str {
    match algo {
        SpliceAlgorithm::InsertionSort => "insertion_sort",
        SpliceAlgorithm::MergeSort => "merge_sort",
        SpliceAlgorithm::BucketSort => "bucket_sort",
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TunedParams {
    /// Block size merge sort hands to insertion sort. A power of two, at least 2.
    pub insertion_threshold: usize,
    /// Buckets used by [`sort_sequence`] for [`SpliceAlgorithm::BucketSort`].
    pub bucket_capacity: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    insertion_threshold: 4,
    bucket_capacity: 64,
};

const _: () = assert!(
    TUNED_PARAMS.insertion_threshold.is_power_of_two() && TUNED_PARAMS.insertion_threshold >= 2
);

/// Sorts the whole sequence with `algo`. Returns the last element, or
/// `End` for an empty sequence.
///
/// The bucket sort groups equal elements, which suits inputs with many
/// duplicates.
pub fn sort_sequence<S>(algo: SpliceAlgorithm, seq: &mut S) -> RightLimit<S::Pos>
where
    S: Cosplice + ExactSize + ?Sized,
    S::Item: Ord,
{
    match algo {
        SpliceAlgorithm::InsertionSort => insertion_sort_splice_all(seq),
        SpliceAlgorithm::MergeSort => merge_sort_splice_all(seq),
        SpliceAlgorithm::BucketSort => {
            let left = seq.before_begin();
            let (_, last) = bucket_sort_splice_by::<{ TUNED_PARAMS.bucket_capacity }, _>(
                seq,
                left,
                RightLimit::End,
                |a, b| a == b,
                Ord::cmp,
            );
            last
        }
    }
}
