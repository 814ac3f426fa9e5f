//! Approximate block height and timestamp estimation.

pub mod blocks;

pub use blocks::{
    blocks_for_days, estimate_block_timestamp, estimate_current_block, estimate_first_seen,
    BlockEstimate,
};
