//! Merge-and-top-K over directories of record files.

pub mod files;

pub use files::{merge_directory, top_by_total_calls, total_calls_of};
