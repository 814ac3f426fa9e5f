//! HTTP client for fetching reports and block estimates from a deployment.

pub mod http;

pub use http::{fetch_text, DashboardClient};
