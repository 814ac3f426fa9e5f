//! Blocking HTTP client for a dashboard API deployment.

use crate::chain::BlockEstimate;
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::ClientError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Client for a deployment's `/eth-block` endpoint
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(ClientError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current block estimate
    pub fn fetch_block_estimate(&self) -> Result<BlockEstimate, ClientError> {
        let url = format!("{}/eth-block", self.base_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(ClientError::RequestFailed)?;

        let response = check_status(response)?;
        response.json().map_err(ClientError::RequestFailed)
    }
}

/// Fetch a raw body from any URL
///
/// A `t=<millis>` query parameter is appended so intermediate caches never
/// serve a stale static artifact.
pub fn fetch_text(url: &str) -> Result<String, ClientError> {
    let client = Client::builder()
        .timeout(DEFAULT_HTTP_TIMEOUT)
        .build()
        .map_err(ClientError::RequestFailed)?;

    let separator = if url.contains('?') { '&' } else { '?' };
    let url = format!(
        "{}{}t={}",
        url,
        separator,
        chrono::Utc::now().timestamp_millis()
    );

    info!("Fetching: {}", url);
    get_text(&client, &url)
}

fn get_text(client: &Client, url: &str) -> Result<String, ClientError> {
    let response = client
        .get(url)
        .send()
        .map_err(ClientError::RequestFailed)?;

    check_status(response)?
        .text()
        .map_err(ClientError::RequestFailed)
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(ClientError::BadStatus {
        status: status.as_u16(),
        body: response.text().unwrap_or_default(),
    })
}

/// Strip trailing slashes and default to http:// when no scheme is given
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
