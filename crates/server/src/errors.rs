use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON API error: a status code plus an `{"error": "<message>"}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Validation(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::Model(m) => ApiError::new(StatusCode::BAD_REQUEST, m.to_string()),
            ServiceError::Storage(msg) => {
                error!(error = %msg, "storage backend failure");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "storage backend failure")
            }
        }
    }
}
