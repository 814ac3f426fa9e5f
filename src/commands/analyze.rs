//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads record files
//! 2. Merges per-block usage into per-contract records (optional)
//! 3. Builds the ranked report
//! 4. Writes the report JSON

use crate::aggregator::{analyze_contracts, calculate_call_distribution, merge_block_usages};
use crate::output::{render_summary, render_view, write_report, TableOptions};
use crate::parser::read_records;
use crate::parser::schema::RankKey;
use crate::utils::config::DEFAULT_TOP_N;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Record files to read
    pub inputs: Vec<PathBuf>,

    /// Output path for the report JSON
    pub output_json: PathBuf,

    /// Number of records per ranked view
    pub top_n: usize,

    /// Fold repeated addresses into one record before ranking
    pub merge_usages: bool,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_json: PathBuf::from("results/latest_analysis.json"),
            top_n: DEFAULT_TOP_N,
            merge_usages: false,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed record files
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of {} input file(s)", args.inputs.len());

    // Step 1: Read records
    info!("Step 1/4: Reading contract records...");
    let mut records = Vec::new();
    for input in &args.inputs {
        let batch = read_records(input)
            .with_context(|| format!("Failed to read records from {}", input.display()))?;
        debug!("{}: {} records", input.display(), batch.len());
        records.extend(batch);
    }

    // Step 2: Merge usage
    if args.merge_usages {
        info!("Step 2/4: Merging per-block usage by contract...");
        records = merge_block_usages(records);
    } else {
        info!("Step 2/4: Skipping usage merge (not requested)");
    }

    let distribution = calculate_call_distribution(&records);
    info!("Call distribution: {}", distribution.summary());
    if distribution.is_highly_concentrated() {
        warn!(
            "Activity is highly concentrated: top 10% of contracts make {:.1}% of calls",
            distribution.top_10_percent_percentage
        );
    }

    // Step 3: Build report
    info!("Step 3/4: Ranking top {} contracts per view...", args.top_n);
    let report = analyze_contracts(&records, args.top_n, Utc::now());

    if let Some(top) = report.most_active_contracts.first() {
        info!("Most active contract: {} with {} calls", top.address, top.total_calls);
    }
    if let Some(top) = report.most_popular_contracts.first() {
        info!(
            "Most popular contract: {} with {} unique wallets",
            top.address, top.unique_wallets
        );
    }

    // Step 4: Write report
    info!("Step 4/4: Writing report...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("ANALYSIS SUMMARY");
        println!("{}", "=".repeat(80));
        println!("{}", render_summary(&report));
        let options = TableOptions {
            short_addresses: true,
            first_seen: None,
        };
        for key in RankKey::ALL {
            println!("\n{}", render_view(report.view(key), key, &options));
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one input file is required");
    }

    for input in &args.inputs {
        if !input.is_file() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    if args.top_n == 0 {
        anyhow::bail!("top_n must be greater than 0");
    }

    if args.top_n > 1000 {
        anyhow::bail!("top_n is too large (max 1000)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::read_report;

    fn write_input(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_validate_args_no_inputs() {
        assert!(validate_args(&AnalyzeArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_missing_input() {
        let args = AnalyzeArgs {
            inputs: vec![PathBuf::from("/nonexistent/contracts.json")],
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_n_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "contracts.json", "[]");

        let zero = AnalyzeArgs {
            inputs: vec![input.clone()],
            top_n: 0,
            ..Default::default()
        };
        assert!(validate_args(&zero).is_err());

        let huge = AnalyzeArgs {
            inputs: vec![input.clone()],
            top_n: 2000,
            ..Default::default()
        };
        assert!(validate_args(&huge).is_err());

        let ok = AnalyzeArgs {
            inputs: vec![input],
            ..Default::default()
        };
        assert!(validate_args(&ok).is_ok());
    }

    #[test]
    fn test_execute_analyze_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_input(
            dir.path(),
            "a.json",
            r#"[{"address": "0xA", "total_calls": 10, "unique_wallets": 5}]"#,
        );
        let second = write_input(
            dir.path(),
            "b.json",
            r#"{"contracts": [{"address": "0xB", "totalCalls": "20", "uniqueWallets": 4}]}"#,
        );
        let output = dir.path().join("results/latest_analysis.json");

        execute_analyze(AnalyzeArgs {
            inputs: vec![first, second],
            output_json: output.clone(),
            ..Default::default()
        })
        .unwrap();

        let report = read_report(&output).unwrap();
        assert_eq!(report.total_contracts_analyzed, 2);
        assert_eq!(report.most_active_contracts[0].address, "0xb");
        assert_eq!(report.most_intensive_contracts[0].avg_calls_per_wallet, 5.0);
    }

    #[test]
    fn test_execute_analyze_merges_usages() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "blocks.json",
            r#"[
                {"address": "aa", "first_interaction_block": 5, "last_interaction_block": 5,
                 "total_calls": 1, "unique_wallets": 1, "interacting_wallets": ["0x1"]},
                {"address": "AA", "first_interaction_block": 7, "last_interaction_block": 7,
                 "total_calls": 2, "unique_wallets": 1, "interacting_wallets": ["0x2"]}
            ]"#,
        );
        let output = dir.path().join("report.json");

        execute_analyze(AnalyzeArgs {
            inputs: vec![input],
            output_json: output.clone(),
            merge_usages: true,
            ..Default::default()
        })
        .unwrap();

        let report = read_report(&output).unwrap();
        assert_eq!(report.most_active_contracts.len(), 1);
        let record = &report.most_active_contracts[0];
        assert_eq!(record.total_calls, 3);
        assert_eq!(record.unique_wallets, 2);
        assert_eq!(record.first_interaction_block, 5);
        assert_eq!(record.last_interaction_block, 7);
    }
}
