//! Record parsing and schema definitions.
//!
//! This module handles:
//! - Parsing record files from the block-streaming pipeline
//! - Normalizing contract and wallet addresses
//! - Defining the report schema

pub mod records;
pub mod schema;

// Re-export main types
pub use records::{is_valid_address, normalize_address, parse_records, read_records};
pub use schema::{
    format_timestamp, ContractAnalysis, ContractRecord, DailyStats, NewVsReturning, RankKey,
};
