//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod merge;
pub mod serve;
pub mod show;
pub mod utils;
pub mod watch;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args, AnalyzeArgs};
pub use merge::{execute_merge, MergeArgs};
pub use serve::execute_serve;
pub use show::{execute_show, ShowArgs};
pub use utils::{display_block_estimate, display_schema, display_version, validate_report_file};
pub use watch::{execute_watch, WatchArgs};
