use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::{ErrorCategory, WeatherError};
use crate::service::{ReportError, ReportStage};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error response rendered as `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "Request failed: {}", self.message);
        } else {
            warn!(status = %self.status, "Request rejected: {}", self.message);
        }

        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        let status = match err.category() {
            ErrorCategory::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::Internal => return Self::internal(),
        };
        Self::new(status, err.user_message())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err.stage {
            // any geocoding failure means the city could not be resolved
            ReportStage::Geocoding => Self::new(StatusCode::NOT_FOUND, err.source.user_message()),
            ReportStage::Validation | ReportStage::Forecast => err.source.into(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
