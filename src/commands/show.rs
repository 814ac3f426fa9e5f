//! Show command: print a report's ranked views as text tables.

use crate::chain::estimate_first_seen;
use crate::loader::{backfill_placeholders, load_or_empty, ReportSource};
use crate::output::{render_summary, render_view, report_to_string, TableOptions};
use crate::parser::schema::RankKey;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};

/// Arguments for the show command
#[derive(Debug, Clone)]
pub struct ShowArgs {
    /// Report file path or URL
    pub source: ReportSource,
    /// Single view to print; all four when `None`
    pub view: Option<RankKey>,
    /// Rows per view
    pub limit: usize,
    pub short_addresses: bool,
    pub fill_placeholders: bool,
    /// Add an estimated first-seen date column using this block time
    pub seconds_per_block: Option<i64>,
    /// Show an empty report instead of failing when loading fails
    pub allow_empty: bool,
    /// Print the report as JSON instead of tables
    pub json: bool,
}

/// Execute the show command
pub fn execute_show(args: ShowArgs) -> Result<()> {
    info!("Loading report from: {}", args.source);

    let now = Utc::now();
    let outcome = load_or_empty(&args.source, now);
    let mut report = match outcome.error {
        Some(e) if !args.allow_empty => {
            return Err(e).with_context(|| format!("Failed to load report from {}", args.source));
        }
        Some(_) => {
            warn!("Showing an empty report");
            outcome.report
        }
        None => outcome.report,
    };

    if args.fill_placeholders {
        backfill_placeholders(&mut report, now);
    }

    if args.json {
        println!("{}", report_to_string(&report)?);
        return Ok(());
    }

    println!("{}", render_summary(&report));

    let keys: Vec<RankKey> = match args.view {
        Some(key) => vec![key],
        None => RankKey::ALL.to_vec(),
    };

    for key in keys {
        let view = report.view(key);
        let rows = &view[..view.len().min(args.limit)];
        let options = TableOptions {
            short_addresses: args.short_addresses,
            first_seen: args
                .seconds_per_block
                .map(|spb| estimate_first_seen(rows, now, spb)),
        };
        println!("\n{}", render_view(rows, key, &options));
    }

    Ok(())
}
