use crate::parser::schema::ContractAnalysis;
use crate::utils::error::LoadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The report artifact is missing or corrupt
    #[error("Report unavailable: {0}")]
    ReportUnavailable(#[from] LoadError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Dashboards expect report-shaped JSON even on failure
            ApiError::ReportUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContractAnalysis::empty(Utc::now())),
            )
                .into_response(),
            ApiError::NotFound(_) => error_body(StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(_) => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

fn error_body(status: StatusCode, error: String) -> Response {
    let body = Json(ErrorResponse {
        error,
        code: status.as_u16(),
    });

    (status, body).into_response()
}
