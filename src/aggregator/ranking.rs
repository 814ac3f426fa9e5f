//! Ranked views over contract records.
//!
//! Every view is a stable descending sort on one key: records with equal
//! keys keep their input order, so identical input always renders the same.
//! Truncation to the top N happens after sorting, never before.

use super::metrics::compute_avg_calls_per_wallet;
use crate::parser::schema::{ContractRecord, RankKey};
use std::cmp::Ordering;

/// Sort records descending by `key`
///
/// **Public** - generic entry point behind the four named views
pub fn rank_by(records: &[ContractRecord], key: RankKey) -> Vec<ContractRecord> {
    let mut ranked = records.to_vec();

    if key == RankKey::AvgCallsPerWallet {
        for record in ranked.iter_mut() {
            record.avg_calls_per_wallet =
                compute_avg_calls_per_wallet(record.total_calls, record.unique_wallets);
        }
    }

    // `sort_by` is stable
    ranked.sort_by(|a, b| compare_desc(a, b, key));
    ranked
}

/// "Most active": descending by total calls
pub fn rank_by_total_calls(records: &[ContractRecord]) -> Vec<ContractRecord> {
    rank_by(records, RankKey::TotalCalls)
}

/// "Most popular": descending by unique wallets
pub fn rank_by_unique_wallets(records: &[ContractRecord]) -> Vec<ContractRecord> {
    rank_by(records, RankKey::UniqueWallets)
}

/// "Most intensive": descending by average calls per wallet
///
/// The average is recomputed from the counts, so stale or missing values in
/// the input don't affect the order.
pub fn rank_by_avg_calls_per_wallet(records: &[ContractRecord]) -> Vec<ContractRecord> {
    rank_by(records, RankKey::AvgCallsPerWallet)
}

/// "Newest": descending by first interaction block
pub fn rank_by_recency(records: &[ContractRecord]) -> Vec<ContractRecord> {
    rank_by(records, RankKey::Recency)
}

/// Keep the first `n` records of an already ranked view
pub fn top_n(mut ranked: Vec<ContractRecord>, n: usize) -> Vec<ContractRecord> {
    ranked.truncate(n);
    ranked
}

/// Rank then truncate
pub fn ranked_view(records: &[ContractRecord], key: RankKey, n: usize) -> Vec<ContractRecord> {
    top_n(rank_by(records, key), n)
}

fn compare_desc(a: &ContractRecord, b: &ContractRecord, key: RankKey) -> Ordering {
    match key {
        RankKey::TotalCalls => b.total_calls.cmp(&a.total_calls),
        RankKey::UniqueWallets => b.unique_wallets.cmp(&a.unique_wallets),
        RankKey::AvgCallsPerWallet => b.avg_calls_per_wallet.total_cmp(&a.avg_calls_per_wallet),
        RankKey::Recency => b.first_interaction_block.cmp(&a.first_interaction_block),
    }
}
