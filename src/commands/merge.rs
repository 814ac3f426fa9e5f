//! Merge command: combine a directory of record files into a top-K list.

use crate::merge::{merge_directory, total_calls_of};
use crate::output::write_json;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the merge command
#[derive(Debug, Clone)]
pub struct MergeArgs {
    pub data_dir: PathBuf,
    /// Write here instead of stdout
    pub output: Option<PathBuf>,
    pub limit: usize,
}

/// Execute the merge command
pub fn execute_merge(args: MergeArgs) -> Result<()> {
    let merged = merge_directory(&args.data_dir, args.limit)
        .with_context(|| format!("Failed to merge {}", args.data_dir.display()))?;

    info!(
        "Merged top {} records (highest: {} calls)",
        merged.len(),
        merged.first().map(total_calls_of).unwrap_or(0)
    );

    match &args.output {
        Some(path) => {
            write_json(&merged, path).context("Failed to write merged JSON")?;
            info!("✓ Merged records written to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string(&merged)?),
    }

    Ok(())
}
