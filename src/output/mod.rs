//! Output writers for reports.
//!
//! This module handles writing data in various formats:
//! - JSON reports and merged record lists
//! - Text tables for the terminal

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{read_report, report_to_string, write_json, write_report};
pub use table::{
    format_address, format_date, format_decimal, format_number, render_summary, render_view,
    TableOptions,
};
