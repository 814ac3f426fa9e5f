//! Derived per-contract metrics and call distribution statistics.
//!
//! The only derived metric in a report is `avg_calls_per_wallet`.
//! Distribution statistics are logged by the analyze command to give a feel
//! for how concentrated activity is.

use crate::parser::schema::ContractRecord;
use log::debug;

/// Average calls per wallet, 0 when there are no wallets
///
/// **Public** - the division rule used everywhere a report is built
///
/// Never divides by zero and never returns NaN or infinity.
pub fn compute_avg_calls_per_wallet(total_calls: u64, unique_wallets: u64) -> f64 {
    if unique_wallets == 0 {
        return 0.0;
    }
    total_calls as f64 / unique_wallets as f64
}

/// Fill in `avg_calls_per_wallet` on every record
///
/// **Public** - must run before ranking by intensity
pub fn derive_metrics(records: &mut [ContractRecord]) {
    debug!("Deriving metrics for {} records", records.len());

    for record in records.iter_mut() {
        record.avg_calls_per_wallet =
            compute_avg_calls_per_wallet(record.total_calls, record.unique_wallets);
    }
}

/// Calculate call distribution statistics
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `records` - Records in any order
///
/// # Returns
/// Statistics about how calls are spread across contracts
pub fn calculate_call_distribution(records: &[ContractRecord]) -> CallDistribution {
    if records.is_empty() {
        return CallDistribution::default();
    }

    let total = records
        .iter()
        .map(|r| r.total_calls)
        .fold(0u64, u64::saturating_add);
    let count = records.len();
    let mean = total / count as u64;

    let mut calls: Vec<u64> = records.iter().map(|r| r.total_calls).collect();
    calls.sort_unstable_by(|a, b| b.cmp(a));
    let median = calls[calls.len() / 2];

    // Top 10% of contracts
    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_calls = calls
        .iter()
        .take(top_10_percent_count)
        .fold(0u64, |acc, c| acc.saturating_add(*c));

    CallDistribution {
        total_calls: total,
        contract_count: count,
        mean_calls_per_contract: mean,
        median_calls_per_contract: median,
        top_10_percent_calls,
        top_10_percent_percentage: if total > 0 {
            (top_10_percent_calls as f64 / total as f64) * 100.0
        } else {
            0.0
        },
    }
}

/// Call distribution statistics
///
/// **Public** - returned from calculate_call_distribution
#[derive(Debug, Clone, Default)]
pub struct CallDistribution {
    /// Total calls across all contracts
    pub total_calls: u64,

    /// Number of records
    pub contract_count: usize,

    /// Mean calls per contract
    pub mean_calls_per_contract: u64,

    /// Median calls per contract
    pub median_calls_per_contract: u64,

    /// Calls made to the busiest 10% of contracts
    pub top_10_percent_calls: u64,

    /// Percentage of total calls in the busiest 10%
    pub top_10_percent_percentage: f64,
}

impl CallDistribution {
    /// Returns true if the busiest 10% of contracts take >80% of calls
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} calls | Contracts: {} | Mean: {} | Median: {} | Top 10%: {:.1}%",
            self.total_calls,
            self.contract_count,
            self.mean_calls_per_contract,
            self.median_calls_per_contract,
            self.top_10_percent_percentage
        )
    }
}
