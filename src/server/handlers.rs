use super::error::ApiError;
use super::state::AppState;
use crate::chain::BlockEstimate;
use crate::loader::{backfill_placeholders, parse_report};
use crate::merge::merge_directory;
use crate::parser::schema::{format_timestamp, ContractAnalysis};
use crate::utils::config::MERGE_LIMIT;
use crate::utils::error::{LoadError, MergeError};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use log::{debug, error, warn};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub base_url: String,
}

/// `GET /contracts`
pub async fn get_contracts(
    State(config): State<AppState>,
) -> Result<Json<ContractAnalysis>, ApiError> {
    let path = &config.report_path;
    debug!("Loading report from {}", path.display());

    let body = tokio::fs::read_to_string(path).await.map_err(|source| {
        let err = LoadError::ReadFailed {
            path: path.display().to_string(),
            source,
        };
        error!("Error loading contract data: {}", err);
        err
    })?;

    let mut report = parse_report(&body)?;
    if config.fill_placeholders {
        backfill_placeholders(&mut report, Utc::now());
    }

    Ok(Json(report))
}

/// `GET /eth-block`
pub async fn get_eth_block() -> Json<BlockEstimate> {
    Json(BlockEstimate::at(Utc::now()))
}

/// `GET /health`
pub async fn get_health(State(config): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: format_timestamp(Utc::now()),
        environment: config.environment.clone(),
        base_url: config
            .base_url
            .clone()
            .unwrap_or_else(|| "not set".to_string()),
    })
}

/// `GET /api.php` - top records by calls across the data directory
pub async fn get_merged(State(config): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let data_dir = config.data_dir.clone();

    let merged = tokio::task::spawn_blocking(move || merge_directory(&data_dir, MERGE_LIMIT))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    match merged {
        Ok(records) => Ok(Json(records)),
        // An absent data directory merges to an empty list
        Err(e @ MergeError::DirectoryUnreadable { .. }) => {
            warn!("{}", e);
            Ok(Json(Vec::new()))
        }
    }
}

/// `GET /results/latest_analysis.json` - the raw artifact, unparsed
pub async fn get_latest_artifact(State(config): State<AppState>) -> Result<Response, ApiError> {
    let body = tokio::fs::read(&config.report_path)
        .await
        .map_err(|_| ApiError::NotFound(config.report_path.display().to_string()))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
