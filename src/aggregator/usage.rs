//! Combine per-block usage records into one record per contract.
//!
//! The block-streaming pipeline emits a usage record per contract per block.
//! Before ranking, those partial records are folded together by address:
//! block range widens, calls add up, wallet sets are unioned.

use super::metrics::compute_avg_calls_per_wallet;
use crate::parser::records::normalize_address;
use crate::parser::schema::ContractRecord;
use log::debug;
use std::collections::HashMap;

/// Merge partial usage records by contract address
///
/// **Public** - used by the analyze command before ranking
///
/// # Arguments
/// * `usages` - Partial records, possibly several per contract
///
/// # Returns
/// One record per distinct (case-insensitive) address, in first-seen order
pub fn merge_block_usages(usages: Vec<ContractRecord>) -> Vec<ContractRecord> {
    let input_len = usages.len();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<ContractRecord> = Vec::new();

    for usage in usages {
        let key = normalize_address(&usage.address);

        match index.get(&key) {
            Some(&pos) => absorb(&mut merged[pos], usage),
            None => {
                index.insert(key, merged.len());
                merged.push(usage);
            }
        }
    }

    for record in merged.iter_mut() {
        record.unique_wallets = record
            .unique_wallets
            .max(record.interacting_wallets.len() as u64);
        record.avg_calls_per_wallet =
            compute_avg_calls_per_wallet(record.total_calls, record.unique_wallets);
    }

    debug!("Merged {} usage records into {} contracts", input_len, merged.len());

    merged
}

fn absorb(target: &mut ContractRecord, usage: ContractRecord) {
    target.first_interaction_block = target
        .first_interaction_block
        .min(usage.first_interaction_block);
    target.last_interaction_block = target
        .last_interaction_block
        .max(usage.last_interaction_block);
    target.total_calls = target.total_calls.saturating_add(usage.total_calls);

    // Every observed count and the union size are lower bounds on the
    // distinct wallet count; keep the largest.
    target.interacting_wallets.extend(usage.interacting_wallets);
    target.unique_wallets = target
        .unique_wallets
        .max(usage.unique_wallets)
        .max(target.interacting_wallets.len() as u64);

    if usage.is_new_contract == Some(true) {
        target.is_new_contract = Some(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(address: &str, block: u64, calls: u64, wallets: &[&str]) -> ContractRecord {
        let mut record = ContractRecord::new(address, calls, wallets.len() as u64)
            .with_blocks(block, block);
        record.interacting_wallets = wallets.iter().map(|w| w.to_string()).collect();
        record
    }

    #[test]
    fn test_merge_same_contract_across_blocks() {
        let merged = merge_block_usages(vec![
            usage("0xaa", 105, 2, &["0x1", "0x2"]),
            usage("0xbb", 100, 1, &["0x1"]),
            usage("0xAA", 101, 3, &["0x2", "0x3"]),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].address, "0xaa");
        assert_eq!(merged[0].first_interaction_block, 101);
        assert_eq!(merged[0].last_interaction_block, 105);
        assert_eq!(merged[0].total_calls, 5);
        assert_eq!(merged[0].unique_wallets, 3);
        assert_eq!(merged[0].avg_calls_per_wallet, 5.0 / 3.0);
        assert_eq!(merged[1].address, "0xbb");
    }

    #[test]
    fn test_merge_keeps_counts_without_wallet_lists() {
        let merged = merge_block_usages(vec![
            ContractRecord::new("0xaa", 10, 4).with_blocks(1, 1),
            ContractRecord::new("0xaa", 5, 6).with_blocks(2, 2),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].total_calls, 15);
        assert_eq!(merged[0].unique_wallets, 6);
    }

    #[test]
    fn test_merge_mixed_list_and_count_only_records() {
        let merged = merge_block_usages(vec![
            ContractRecord::new("0xaa", 3, 4).with_blocks(1, 1),
            usage("0xaa", 2, 1, &["0x1"]),
        ]);

        assert_eq!(merged[0].unique_wallets, 4);
        assert_eq!(merged[0].interacting_wallets.len(), 1);

        let merged = merge_block_usages(vec![
            usage("0xbb", 1, 1, &["0x1"]),
            ContractRecord::new("0xbb", 3, 2).with_blocks(2, 2),
            usage("0xbb", 3, 1, &["0x2", "0x3", "0x4"]),
        ]);

        assert_eq!(merged[0].unique_wallets, 4);
    }

    #[test]
    fn test_merge_saturates_call_totals() {
        let merged = merge_block_usages(vec![
            ContractRecord::new("0xaa", u64::MAX, 1).with_blocks(1, 1),
            ContractRecord::new("0xAA", 5, 1).with_blocks(2, 2),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].total_calls, u64::MAX);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_block_usages(Vec::new()).is_empty());
    }
}
