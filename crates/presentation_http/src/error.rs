//! API error handling
//!
//! Maps application failures onto HTTP statuses and a stable JSON body.
//! Upstream and input errors keep their message; internal errors are
//! replaced by a generic text and logged instead.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was unusable
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A pipeline run failed
    #[error(transparent)]
    Pipeline(#[from] ApplicationError),

    /// Rendering or other server-side failure outside the pipeline
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// HTTP status for a failed pipeline run
pub const fn status_for(err: &ApplicationError) -> StatusCode {
    match err {
        ApplicationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ApplicationError::WeatherFetch(_)
        | ApplicationError::MalformedWeatherData(_)
        | ApplicationError::Generation(_) => StatusCode::BAD_GATEWAY,
        ApplicationError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        ApplicationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    /// HTTP status of this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(err) => status_for(err),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: "Bad request".to_string(),
                code: "bad_request".to_string(),
                details: Some(msg.clone()),
            },
            Self::Pipeline(ApplicationError::Internal(_)) | Self::Internal(_) => ErrorResponse {
                error: "An internal error occurred".to_string(),
                code: "internal_error".to_string(),
                details: None,
            },
            Self::Pipeline(err) => ErrorResponse {
                error: err.to_string(),
                code: err.code().to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<infrastructure::TemplateError> for ApiError {
    fn from(err: infrastructure::TemplateError) -> Self {
        Self::Internal(err.to_string())
    }
}
