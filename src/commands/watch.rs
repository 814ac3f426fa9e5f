//! Watch command: poll `/eth-block` on a fixed interval.
//!
//! The latest successful response replaces the previous one. A failed poll
//! keeps showing the last known value and waits for the next tick; there is
//! no other retry.

use crate::chain::BlockEstimate;
use crate::client::DashboardClient;
use crate::output::format_number;
use crate::utils::config::BLOCKS_PER_DAY;
use anyhow::{Context, Result};
use log::{error, info};
use std::time::Duration;

/// Arguments for the watch command
#[derive(Debug, Clone)]
pub struct WatchArgs {
    pub base_url: String,
    pub interval: Duration,
    /// Stop after this many polls; run forever when `None`
    pub max_polls: Option<usize>,
}

/// Last value shown to the user
#[derive(Debug, Default)]
pub struct BlockDisplay {
    latest: Option<BlockEstimate>,
    failures: usize,
}

impl BlockDisplay {
    /// Apply one poll result; returns the line to print
    pub fn update(&mut self, result: Result<BlockEstimate, String>) -> String {
        match result {
            Ok(estimate) => {
                self.latest = Some(estimate);
                self.failures = 0;
            }
            Err(e) => {
                self.failures += 1;
                error!("Error fetching block data: {}", e);
            }
        }
        self.render()
    }

    pub fn latest(&self) -> Option<&BlockEstimate> {
        self.latest.as_ref()
    }

    fn render(&self) -> String {
        let stale = if self.failures > 0 { " (stale)" } else { "" };
        match &self.latest {
            Some(estimate) => format!(
                "Current block: {} | 3-month range: {} -> {} | ~{} blocks/day{}",
                format_number(estimate.block_number),
                format_number(estimate.three_months_ago),
                format_number(estimate.block_number),
                format_number(BLOCKS_PER_DAY),
                stale
            ),
            None => "Current block: error loading".to_string(),
        }
    }
}

/// Execute the watch command
pub fn execute_watch(args: WatchArgs) -> Result<()> {
    let client =
        DashboardClient::new(&args.base_url).context("Failed to create dashboard client")?;

    info!(
        "Polling {}/eth-block every {}s",
        client.base_url(),
        args.interval.as_secs()
    );

    let mut display = BlockDisplay::default();
    let mut polls = 0usize;

    loop {
        let result = client.fetch_block_estimate().map_err(|e| e.to_string());
        println!("{}", display.update(result));

        polls += 1;
        if args.max_polls.map(|max| polls >= max).unwrap_or(false) {
            break;
        }
        std::thread::sleep(args.interval);
    }

    Ok(())
}
