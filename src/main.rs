//! Contract Activity CLI
//!
//! Builds, inspects and serves Ethereum contract activity reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use contract_activity::commands::{
    display_block_estimate, display_schema, display_version, execute_analyze, execute_merge,
    execute_serve, execute_show, execute_watch, validate_args, validate_report_file, AnalyzeArgs,
    MergeArgs, ShowArgs, WatchArgs,
};
use contract_activity::loader::ReportSource;
use contract_activity::parser::schema::RankKey;
use contract_activity::server::ServerConfig;
use contract_activity::utils::config::{
    DEFAULT_BIND_ADDR, DEFAULT_ENVIRONMENT, DEFAULT_POLL_INTERVAL, DEFAULT_TOP_N, MERGE_LIMIT,
};

/// Contract Activity - ranked reports of Ethereum contract usage
#[derive(Parser, Debug)]
#[command(name = "contract-activity")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a ranked report from contract record files
    Analyze {
        /// Record files (JSON array or {"contracts": [...]})
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output path for the report JSON
        #[arg(short, long, default_value = "results/latest_analysis.json")]
        output: PathBuf,

        /// Number of contracts per ranked view
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Fold repeated addresses (per-block usage) into one record
        #[arg(long)]
        merge_usages: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print a report's ranked views as tables
    Show {
        /// Report file path or http(s) URL
        #[arg(short, long, env = "REPORT_PATH", default_value = "results/latest_analysis.json")]
        report: String,

        /// Only this view: active, popular, intensive or newest
        #[arg(long)]
        view: Option<RankKey>,

        /// Rows per view
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        limit: usize,

        /// Shorten addresses to 0x1234...abcd
        #[arg(long)]
        short: bool,

        /// Fill missing optional sections with flagged sample data
        #[arg(long)]
        fill_placeholders: bool,

        /// Add an estimated first-seen date column; block time in seconds (12 when omitted)
        #[arg(long, num_args = 0..=1, default_missing_value = "12")]
        block_time: Option<i64>,

        /// Show an empty report instead of failing when the report can't be loaded
        #[arg(long)]
        allow_empty: bool,

        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Merge a directory of record files into the top records by calls
    Merge {
        /// Directory of *.json record files
        #[arg(short, long, env = "DATA_DIR")]
        data_dir: PathBuf,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of records to keep
        #[arg(long, default_value_t = MERGE_LIMIT)]
        limit: usize,
    },

    /// Serve the report and helper endpoints over HTTP
    Serve {
        /// Report artifact served at /contracts
        #[arg(short, long, env = "REPORT_PATH", default_value = "results/latest_analysis.json")]
        report: PathBuf,

        /// Record directory merged at /api.php
        #[arg(short, long, env = "DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Address to listen on
        #[arg(short, long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
        bind: String,

        /// Environment name reported by /health
        #[arg(long, env = "APP_ENV", default_value = DEFAULT_ENVIRONMENT)]
        environment: String,

        /// Public base URL reported by /health
        #[arg(long, env = "BASE_URL")]
        base_url: Option<String>,

        /// Fill missing optional sections with flagged sample data
        #[arg(long)]
        fill_placeholders: bool,
    },

    /// Poll a deployment's /eth-block endpoint
    Watch {
        /// Base URL of the deployment
        #[arg(short, long, env = "BASE_URL", default_value = "http://localhost:3000")]
        url: String,

        /// Seconds between polls
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
        interval: u64,

        /// Stop after this many polls
        #[arg(long)]
        count: Option<usize>,
    },

    /// Print the estimated current block
    Block,

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            top,
            merge_usages,
            summary,
        } => {
            let args = AnalyzeArgs {
                inputs: input,
                output_json: output,
                top_n: top,
                merge_usages,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Show {
            report,
            view,
            limit,
            short,
            fill_placeholders,
            block_time,
            allow_empty,
            json,
        } => {
            let source: ReportSource = report.parse()?;
            execute_show(ShowArgs {
                source,
                view,
                limit,
                short_addresses: short,
                fill_placeholders,
                seconds_per_block: block_time,
                allow_empty,
                json,
            })?;
        }

        Commands::Merge {
            data_dir,
            output,
            limit,
        } => {
            execute_merge(MergeArgs {
                data_dir,
                output,
                limit,
            })?;
        }

        Commands::Serve {
            report,
            data_dir,
            bind,
            environment,
            base_url,
            fill_placeholders,
        } => {
            let config = ServerConfig {
                report_path: report,
                data_dir,
                environment,
                base_url,
                fill_placeholders,
            };
            execute_serve(config, &bind)?;
        }

        Commands::Watch {
            url,
            interval,
            count,
        } => {
            execute_watch(WatchArgs {
                base_url: url,
                interval: Duration::from_secs(interval.max(1)),
                max_polls: count,
            })?;
        }

        Commands::Block => {
            display_block_estimate();
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_block_time(args: &[&str]) -> Option<i64> {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Show { block_time, .. } => block_time,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_block_time_flag_defaults_to_twelve() {
        assert_eq!(show_block_time(&["contract-activity", "show", "--block-time"]), Some(12));
        assert_eq!(
            show_block_time(&["contract-activity", "show", "--block-time", "2"]),
            Some(2)
        );
        assert_eq!(show_block_time(&["contract-activity", "show"]), None);
    }
}
