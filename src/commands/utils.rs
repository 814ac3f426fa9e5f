use crate::chain::BlockEstimate;
use crate::output::{format_number, read_report};
use crate::parser::records::is_valid_address;
use crate::parser::schema::{ContractAnalysis, RankKey};
use crate::utils::config::{BLOCKS_PER_DAY, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Generated: {}", report.analysis_timestamp);
    println!("  Contracts Analyzed: {}", report.total_contracts_analyzed);
    for key in RankKey::ALL {
        println!("  {}: {}", key.title(), report.view(key).len());
    }

    for warning in report_warnings(&report) {
        println!("  ⚠ {}", warning);
    }

    Ok(())
}

/// Consistency problems in a loaded report, one message each
pub fn report_warnings(report: &ContractAnalysis) -> Vec<String> {
    let mut warnings = Vec::new();
    let records = || RankKey::ALL.into_iter().flat_map(move |k| report.view(k));

    let inverted = records()
        .filter(|r| r.first_interaction_block > r.last_interaction_block)
        .count();
    if inverted > 0 {
        warnings.push(format!(
            "{} record(s) with first block after last block",
            inverted
        ));
    }

    let invalid: BTreeSet<&str> = records()
        .map(|r| r.address.as_str())
        .filter(|a| !is_valid_address(a))
        .collect();
    if !invalid.is_empty() {
        warnings.push(format!(
            "{} address(es) are not 20-byte hex: {}",
            invalid.len(),
            invalid.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    if let Some(split) = &report.new_vs_returning_contracts {
        if split.new_contracts.saturating_add(split.returning_contracts)
            != report.total_contracts_analyzed
        {
            warnings.push(format!(
                "new ({}) + returning ({}) does not match contracts analyzed",
                split.new_contracts, split.returning_contracts
            ));
        }
    }

    if report.has_placeholders() {
        warnings.push(format!(
            "Sample data in: {}",
            report.placeholder_fields.join(", ")
        ));
    }

    warnings
}

/// Print the block estimate for the current wall-clock time
pub fn display_block_estimate() {
    let estimate = BlockEstimate::at(Utc::now());

    println!("Estimated current block: {}", format_number(estimate.block_number));
    println!(
        "3-month analysis range:  {} -> {}",
        format_number(estimate.three_months_ago),
        format_number(estimate.block_number)
    );
    println!("Blocks per day:          ~{}", format_number(BLOCKS_PER_DAY));
    println!("(estimate from a 12s average block time, not a chain query)");
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Contract Activity Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  most_active_contracts: array     - Ranked by total_calls");
        println!("  most_popular_contracts: array    - Ranked by unique_wallets");
        println!("  most_intensive_contracts: array  - Ranked by avg_calls_per_wallet");
        println!("  newest_contracts: array          - Ranked by first_interaction_block");
        println!("    address: string                - Contract address (hex)");
        println!("    first_interaction_block: number");
        println!("    last_interaction_block: number");
        println!("    total_calls: number");
        println!("    unique_wallets: number");
        println!("    avg_calls_per_wallet: number   - 0 when unique_wallets is 0");
        println!("    interacting_wallets: array");
        println!("  total_contracts_analyzed: number - Distinct contracts");
        println!("  analysis_timestamp: string       - ISO 8601 timestamp");
        println!("  daily_stats: array?              - Per-day totals");
        println!("  new_vs_returning_contracts: object?");
        println!("  placeholder_fields: array?       - Sections holding sample data");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Contract Activity v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Ranking, serving and merging of Ethereum contract activity reports.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{ContractRecord, NewVsReturning};
    use chrono::TimeZone;

    fn report_with(records: Vec<ContractRecord>) -> ContractAnalysis {
        let mut report = ContractAnalysis::empty(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        report.total_contracts_analyzed = records.len() as u64;
        report.most_active_contracts = records;
        report
    }

    #[test]
    fn test_report_warnings_clean_report() {
        let report = report_with(vec![ContractRecord::new(
            "0x7a250d5630b4cf539739df2c5dacb4c659f2488d",
            10,
            2,
        )
        .with_blocks(1, 2)]);

        assert!(report_warnings(&report).is_empty());
    }

    #[test]
    fn test_report_warnings_flags_invalid_addresses() {
        let report = report_with(vec![
            ContractRecord::new("0x1234", 10, 2),
            ContractRecord::new("0x7a250d5630b4cf539739df2c5dacb4c659f2488d", 1, 1),
        ]);

        let warnings = report_warnings(&report);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("0x1234"));
        assert!(!warnings[0].contains("0x7a25"));
    }

    #[test]
    fn test_report_warnings_inverted_blocks_and_split() {
        let mut report = report_with(vec![ContractRecord::new(
            "0x7a250d5630b4cf539739df2c5dacb4c659f2488d",
            10,
            2,
        )
        .with_blocks(9, 3)]);
        report.new_vs_returning_contracts = Some(NewVsReturning {
            new_contracts: 5,
            returning_contracts: 5,
        });
        report.placeholder_fields = vec!["daily_stats".to_string()];

        let warnings = report_warnings(&report);

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("first block after last block"));
        assert!(warnings[1].contains("does not match"));
        assert!(warnings[2].contains("daily_stats"));
    }
}
