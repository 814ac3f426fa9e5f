//! Block number and timestamp estimates.
//!
//! All values here are linear approximations from a fixed average block
//! time. They are display labels only and can drift from real chain
//! timestamps by minutes to hours; never use them for decisions that need
//! an exact block or time.

use crate::parser::schema::{format_timestamp, ContractRecord};
use crate::utils::config::{
    ANALYSIS_WINDOW_DAYS, BLOCKS_PER_DAY, REFERENCE_BLOCK, REFERENCE_BLOCK_TIMESTAMP,
    SECONDS_PER_BLOCK,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estimated chain head, as returned by `/eth-block`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEstimate {
    pub block_number: u64,
    /// Start of the three-month analysis window
    pub three_months_ago: u64,
    pub timestamp: String,
}

impl BlockEstimate {
    /// Estimate the chain head at `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        let block_number = estimate_current_block(now);
        Self {
            block_number,
            three_months_ago: block_number.saturating_sub(blocks_for_days(ANALYSIS_WINDOW_DAYS)),
            timestamp: format_timestamp(now),
        }
    }
}

/// Estimate the timestamp of `target_block`
///
/// `reference_timestamp - (reference_block - target_block) * seconds_per_block`.
/// Blocks after the reference extrapolate forward.
pub fn estimate_block_timestamp(
    reference_block: u64,
    reference_timestamp: i64,
    target_block: u64,
    seconds_per_block: i64,
) -> i64 {
    let block_delta = reference_block as i64 - target_block as i64;
    reference_timestamp - block_delta * seconds_per_block
}

/// Estimate the current block number from wall-clock time
pub fn estimate_current_block(now: DateTime<Utc>) -> u64 {
    let elapsed = now.timestamp() - REFERENCE_BLOCK_TIMESTAMP;
    let blocks = elapsed.div_euclid(SECONDS_PER_BLOCK);
    (REFERENCE_BLOCK as i64 + blocks).max(0) as u64
}

/// Approximate number of blocks produced in `days`
pub fn blocks_for_days(days: u64) -> u64 {
    BLOCKS_PER_DAY.saturating_mul(days)
}

/// First-seen time estimate for each record of a view
///
/// The first record's `last_interaction_block` is taken to be the block at
/// `now`, which is how the contracts table labels its "first seen" column.
pub fn estimate_first_seen(
    records: &[ContractRecord],
    now: DateTime<Utc>,
    seconds_per_block: i64,
) -> Vec<Option<DateTime<Utc>>> {
    let reference_block = records
        .first()
        .map(|r| r.last_interaction_block)
        .unwrap_or(0);

    records
        .iter()
        .map(|r| {
            let ts = estimate_block_timestamp(
                reference_block,
                now.timestamp(),
                r.first_interaction_block,
                seconds_per_block,
            );
            DateTime::from_timestamp(ts, 0)
        })
        .collect()
}
