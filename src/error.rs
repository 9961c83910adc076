use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Generic message shown to callers when scoring fails unexpectedly.
pub const ANALYZE_FAILED: &str = "Failed to analyze website";

/// Errors surfaced by the aggregator and the scorer.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Required input missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The places provider answered with a non-success status.
    #[error("{0}")]
    Upstream(String),

    /// Transport failure while talking to the places provider.
    #[error("Failed to reach places provider: {0}")]
    Http(reqwest::Error),

    /// Anything unexpected; details stay in the server log.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result type.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Upstream(_) | AppError::Http(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => ANALYZE_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}

// Request URLs carry the provider credential, so they never make it into the error
impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e.without_url())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            ::log::error!("Request failed: {}", self);
        } else {
            ::log::warn!("Request rejected: {}", self);
        }
        (
            status,
            Json(serde_json::json!({ "error": self.client_message() })),
        )
            .into_response()
    }
}
