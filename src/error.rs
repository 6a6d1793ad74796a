//! Error handling for the health metrics crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// A specialized `Result` type for health metrics operations.
pub type Result<T> = std::result::Result<T, MetricError>;

/// The main error type for recording and querying metrics.
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    /// The request body or query could not be parsed or failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request body exceeded the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The backing store rejected the operation or could not be reached
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetricError {
    /// Create a new invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Stable machine-readable code included in error responses.
    pub fn client_code(&self) -> &'static str {
        match self {
            MetricError::InvalidRequest(_) => "INVALID_REQUEST",
            MetricError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            MetricError::Persistence(_) => "PERSISTENCE",
            MetricError::Config(_) => "CONFIG",
            MetricError::WebServer(_) | MetricError::Io(_) => "INTERNAL",
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MetricError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            MetricError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MetricError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.client_code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
