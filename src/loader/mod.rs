//! Report loading from disk or HTTP with fallback behaviour.

pub mod report;

pub use report::{
    backfill_placeholders, load_or_empty, load_report, parse_report, LoadOutcome, ReportSource,
    DAILY_STATS_FIELD, NEW_VS_RETURNING_FIELD,
};
