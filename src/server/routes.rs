use super::handlers::{get_contracts, get_eth_block, get_health, get_latest_artifact, get_merged};
use super::state::AppState;
use crate::utils::config::LATEST_ANALYSIS_PATH;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/contracts", get(get_contracts))
        .route("/eth-block", get(get_eth_block))
        .route("/health", get(get_health))
        .route("/api.php", get(get_merged))
        .route(&format!("/{}", LATEST_ANALYSIS_PATH), get(get_latest_artifact))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
