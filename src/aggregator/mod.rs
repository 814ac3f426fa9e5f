//! Aggregation of contract records into ranked report views.
//!
//! This module transforms contract records into:
//! - Per-contract records (merging per-block usage)
//! - Derived metrics (average calls per wallet)
//! - Ranked views and the full report

pub mod analysis;
pub mod metrics;
pub mod ranking;
pub mod usage;

// Re-export main types and functions
pub use analysis::{analyze_contracts, calculate_daily_stats, calculate_new_vs_returning};
pub use metrics::{
    calculate_call_distribution, compute_avg_calls_per_wallet, derive_metrics, CallDistribution,
};
pub use ranking::{
    rank_by, rank_by_avg_calls_per_wallet, rank_by_recency, rank_by_total_calls,
    rank_by_unique_wallets, ranked_view, top_n,
};
pub use usage::merge_block_usages;
