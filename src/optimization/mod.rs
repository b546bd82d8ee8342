pub mod merge_sort;
pub mod settlement;
