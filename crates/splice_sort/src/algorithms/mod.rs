pub(crate) mod common;

pub mod bucket_sort;
pub mod insertion_sort;
pub mod merge;
pub mod merge_sort;
