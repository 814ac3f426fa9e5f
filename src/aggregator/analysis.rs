//! Build a full report from contract records.

use super::metrics::derive_metrics;
use super::ranking::ranked_view;
use crate::parser::records::normalize_address;
use crate::parser::schema::{
    format_timestamp, ContractAnalysis, ContractRecord, DailyStats, NewVsReturning, RankKey,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Build a report with the four ranked views
///
/// **Public** - main entry point for report generation
///
/// # Arguments
/// * `records` - Contract records for the analysis window
/// * `top_n` - Records kept per ranked view
/// * `now` - Report creation time
///
/// # Returns
/// A report whose optional sections are present only when the records
/// carry the data for them
pub fn analyze_contracts(
    records: &[ContractRecord],
    top_n: usize,
    now: DateTime<Utc>,
) -> ContractAnalysis {
    info!("Analyzing {} contract records (top {})", records.len(), top_n);

    let mut records = records.to_vec();
    derive_metrics(&mut records);

    let distinct: HashSet<String> = records
        .iter()
        .map(|r| normalize_address(&r.address))
        .collect();

    let daily_stats = calculate_daily_stats(&records);
    let new_vs_returning = calculate_new_vs_returning(&records, distinct.len() as u64);

    ContractAnalysis {
        most_active_contracts: ranked_view(&records, RankKey::TotalCalls, top_n),
        most_popular_contracts: ranked_view(&records, RankKey::UniqueWallets, top_n),
        most_intensive_contracts: ranked_view(&records, RankKey::AvgCallsPerWallet, top_n),
        newest_contracts: ranked_view(&records, RankKey::Recency, top_n),
        total_contracts_analyzed: distinct.len() as u64,
        analysis_timestamp: format_timestamp(now),
        daily_stats,
        new_vs_returning_contracts: new_vs_returning,
        placeholder_fields: Vec::new(),
    }
}

#[derive(Default)]
struct DayAccumulator {
    contracts: BTreeSet<String>,
    new_contracts: BTreeSet<String>,
    total_calls: u64,
    wallets: BTreeSet<String>,
    max_wallet_count: u64,
}

/// Per-day totals for records that carry a `day_timestamp`
///
/// Returns `None` when no record is bucketed by day. Unique wallets per day
/// is the size of the union of wallet sets, or the largest per-record count
/// when wallet lists were not exported.
pub fn calculate_daily_stats(records: &[ContractRecord]) -> Option<Vec<DailyStats>> {
    let mut days: BTreeMap<i64, DayAccumulator> = BTreeMap::new();

    for record in records {
        let Some(day) = record.day_timestamp else {
            continue;
        };
        let address = normalize_address(&record.address);
        let acc = days.entry(day).or_default();

        if record.is_new_contract == Some(true) {
            acc.new_contracts.insert(address.clone());
        }
        acc.contracts.insert(address);
        acc.total_calls = acc.total_calls.saturating_add(record.total_calls);
        acc.wallets.extend(record.interacting_wallets.iter().cloned());
        acc.max_wallet_count = acc.max_wallet_count.max(record.unique_wallets);
    }

    if days.is_empty() {
        return None;
    }

    debug!("Computed daily stats for {} days", days.len());

    Some(
        days.into_iter()
            .map(|(day, acc)| DailyStats {
                day_timestamp: day,
                active_contracts: acc.contracts.len() as u64,
                new_contracts: acc.new_contracts.len() as u64,
                total_calls: acc.total_calls,
                unique_wallets: (acc.wallets.len() as u64).max(acc.max_wallet_count),
            })
            .collect(),
    )
}

/// Split distinct contracts into new and returning
///
/// Returns `None` when no record carries an `is_new_contract` flag. The two
/// counts always sum to `total_contracts`.
pub fn calculate_new_vs_returning(
    records: &[ContractRecord],
    total_contracts: u64,
) -> Option<NewVsReturning> {
    if records.iter().all(|r| r.is_new_contract.is_none()) {
        return None;
    }

    let new_contracts = records
        .iter()
        .filter(|r| r.is_new_contract == Some(true))
        .map(|r| normalize_address(&r.address))
        .collect::<HashSet<_>>()
        .len() as u64;

    Some(NewVsReturning {
        new_contracts,
        returning_contracts: total_contracts.saturating_sub(new_contracts),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_analyze_scenario() {
        let records = vec![
            ContractRecord::new("0xA", 10, 5),
            ContractRecord::new("0xB", 20, 4),
        ];

        let report = analyze_contracts(&records, 10, now());

        assert_eq!(report.total_contracts_analyzed, 2);
        assert_eq!(report.most_active_contracts[0].address, "0xB");
        assert_eq!(report.most_intensive_contracts[0].avg_calls_per_wallet, 5.0);
        assert_eq!(report.most_intensive_contracts[1].avg_calls_per_wallet, 2.0);
        assert_eq!(report.analysis_timestamp, "2025-03-01T12:00:00.000Z");
        assert!(report.daily_stats.is_none());
        assert!(report.new_vs_returning_contracts.is_none());
    }

    #[test]
    fn test_analyze_empty() {
        let report = analyze_contracts(&[], 10, now());

        assert_eq!(report.total_contracts_analyzed, 0);
        for key in RankKey::ALL {
            assert!(report.view(key).is_empty());
        }
    }

    #[test]
    fn test_total_counts_distinct_addresses() {
        let records = vec![
            ContractRecord::new("0xAB", 1, 1),
            ContractRecord::new("0xab", 2, 1),
            ContractRecord::new("0xcd", 3, 1),
        ];

        let report = analyze_contracts(&records, 10, now());

        assert_eq!(report.total_contracts_analyzed, 2);
        assert_eq!(report.most_active_contracts.len(), 3);
    }

    #[test]
    fn test_daily_stats_grouped_and_ordered() {
        let mut a = ContractRecord::new("0xa", 10, 2);
        a.day_timestamp = Some(86_400 * 2);
        a.is_new_contract = Some(true);
        a.interacting_wallets = ["0x1", "0x2"].iter().map(|s| s.to_string()).collect();

        let mut b = ContractRecord::new("0xb", 5, 2);
        b.day_timestamp = Some(86_400 * 2);
        b.interacting_wallets = ["0x2", "0x3"].iter().map(|s| s.to_string()).collect();

        let mut c = ContractRecord::new("0xa", 1, 1);
        c.day_timestamp = Some(86_400);

        let stats = calculate_daily_stats(&[a, b, c]).unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].day_timestamp, 86_400);
        assert_eq!(stats[0].unique_wallets, 1);
        assert_eq!(stats[1].active_contracts, 2);
        assert_eq!(stats[1].new_contracts, 1);
        assert_eq!(stats[1].total_calls, 15);
        assert_eq!(stats[1].unique_wallets, 3);
    }

    #[test]
    fn test_daily_stats_saturate_call_totals() {
        let mut a = ContractRecord::new("0xa", u64::MAX, 1);
        a.day_timestamp = Some(86_400);
        let mut b = ContractRecord::new("0xa", 5, 1);
        b.day_timestamp = Some(86_400);

        let stats = calculate_daily_stats(&[a, b]).unwrap();

        assert_eq!(stats[0].total_calls, u64::MAX);
    }

    #[test]
    fn test_new_vs_returning_sums_to_total() {
        let mut a = ContractRecord::new("0xa", 1, 1);
        a.is_new_contract = Some(true);
        let mut b = ContractRecord::new("0xb", 1, 1);
        b.is_new_contract = Some(false);
        let c = ContractRecord::new("0xc", 1, 1);

        let report = analyze_contracts(&[a, b, c], 10, now());
        let split = report.new_vs_returning_contracts.unwrap();

        assert_eq!(split.new_contracts, 1);
        assert_eq!(split.returning_contracts, 2);
        assert_eq!(
            split.new_contracts + split.returning_contracts,
            report.total_contracts_analyzed
        );
    }
}
