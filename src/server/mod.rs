//! HTTP service exposing the report, block estimates and the merge endpoint.
//!
//! Handlers are stateless apart from the shared config: every request
//! re-reads its files, so the latest write to the artifact wins.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, ServerConfig};

use crate::utils::error::ServerError;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(config: ServerConfig, addr: &str) -> Result<(), ServerError> {
    info!("Serving report: {}", config.report_path.display());
    info!("Merge data directory: {}", config.data_dir.display());

    let app = create_router(Arc::new(config));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::BindFailed {
            addr: addr.to_string(),
            source,
        })?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
