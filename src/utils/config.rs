//! Configuration and constants for the CLI and the HTTP service.

use std::time::Duration;

/// Default timeout for dashboard API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Ethereum averages one block every 12 seconds.
// Every block estimate in this crate is derived from this constant and is
// only good enough for display labels.
pub const SECONDS_PER_BLOCK: i64 = 12;
pub const BLOCKS_PER_DAY: u64 = 24 * 60 * 60 / SECONDS_PER_BLOCK as u64; // ~7,200
/// Three 30-day months
pub const ANALYSIS_WINDOW_DAYS: u64 = 3 * 30;

// Known anchor for current-block estimation: block 16,900,000 was produced
// around 2023-04-01T00:00:00Z.
pub const REFERENCE_BLOCK: u64 = 16_900_000;
pub const REFERENCE_BLOCK_TIMESTAMP: i64 = 1_680_307_200;

/// Number of records kept in each ranked view of a report
pub const DEFAULT_TOP_N: usize = 10;

/// Number of records returned by the merge endpoint
pub const MERGE_LIMIT: usize = 100;

/// Interval between `/eth-block` polls in watch mode
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Artifact path, relative to the served directory, that dashboards fetch
pub const LATEST_ANALYSIS_PATH: &str = "results/latest_analysis.json";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ENVIRONMENT: &str = "development";

// Key spellings emitted by the upstream block-streaming pipeline
pub const RECORD_LIST_FIELD_NAMES: &[&str] = &["contracts", "records", "result"];
