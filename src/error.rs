use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::service::ServiceError;

/// A specialized `Result` type for REST handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error for the HTTP boundary.
///
/// Kept lightweight and fully non-panicking; every variant maps to a
/// stable JSON error envelope.
#[derive(Debug)]
pub enum AppError {
    /// The request is missing a required field or carries an empty one.
    InvalidPayload(String),
    /// The SMS submission failed; carries the step-tagged cause.
    SendFailed(ServiceError),
    /// An internal failure outside the modem exchange.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPayload(details) => {
                write!(f, "The request payload is invalid: {details}")
            }
            Self::SendFailed(e) => write!(f, "Failed to send SMS: {e}"),
            Self::Internal(details) => write!(f, "Internal error: {details}"),
        }
    }
}

/// Allows Axum to convert `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, error_message) = match self {
            Self::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "InvalidPayload", self.to_string()),
            Self::SendFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SendFailed", self.to_string()),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal", self.to_string()),
        };

        let body = axum::Json(json!({
            "status": "error",
            "error": { "type": error_type, "message": error_message }
        }));
        (status, body).into_response()
    }
}

// Implement `From` conversions to allow the `?` operator to work seamlessly.
impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::SendFailed(err)
    }
}
