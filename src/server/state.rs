use std::path::PathBuf;
use std::sync::Arc;

/// Runtime settings for the HTTP service
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Report artifact served by `/contracts`
    pub report_path: PathBuf,
    /// Directory of record files merged by `/api.php`
    pub data_dir: PathBuf,
    /// Reported by `/health`
    pub environment: String,
    /// Public base URL, reported by `/health`
    pub base_url: Option<String>,
    /// Backfill missing optional report sections with flagged sample data
    pub fill_placeholders: bool,
}

pub type AppState = Arc<ServerConfig>;
