//! Serve command: run the HTTP service on a tokio runtime.

use crate::server::{serve, ServerConfig};
use anyhow::{Context, Result};

/// Execute the serve command, blocking until shutdown
pub fn execute_serve(config: ServerConfig, bind_addr: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    runtime
        .block_on(serve(config, bind_addr))
        .context("HTTP service failed")?;

    Ok(())
}
