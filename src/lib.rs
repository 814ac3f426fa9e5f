//! Contract Activity
//!
//! Ranking, serving and merging of Ethereum contract activity reports.
//!
//! This crate provides the core implementation for the
//! `contract-activity` CLI tool: it turns contract interaction records into
//! a ranked report (most active, most popular, most intensive, newest),
//! serves that report over HTTP, and merges record files into a
//! top-by-calls list.
//!
//! ## Getting Started
//!
//! ```bash
//! contract-activity analyze -i output/contracts.json --summary
//! contract-activity serve --report results/latest_analysis.json
//! ```

pub mod aggregator;
pub mod chain;
pub mod client;
pub mod commands;
pub mod loader;
pub mod merge;
pub mod output;
pub mod parser;
pub mod server;
pub mod utils;
