use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use yieldcast_core::CoreError;

use crate::response::error_response;

pub const NOT_FOUND_MESSAGE: &str = "The requested URL was not found on the server.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "The method is not allowed for the requested URL.";
pub const NOT_IMPLEMENTED_MESSAGE: &str = "This endpoint is not yet implemented.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";
pub const REQUEST_TIMEOUT_MESSAGE: &str = "The request timed out.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `yieldcast_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be parsed as JSON.
    #[error("Invalid data format: {0}")]
    InvalidBody(String),

    /// The request body could not be read (too large, aborted stream).
    #[error(transparent)]
    BodyRejected(#[from] BytesRejection),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Reserved feature routes.
    #[error("Not implemented")]
    NotImplemented,

    /// An internal error; the detail is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Core(core) => match core {
                CoreError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::MissingInput
                | CoreError::MissingFields(_)
                | CoreError::Validation(_)
                | CoreError::MalformedFeature(_)
                | CoreError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
                CoreError::Prediction(_) | CoreError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::BodyRejected(rejection) => rejection.status(),
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Core(core) => match core {
                CoreError::Prediction(detail) | CoreError::Internal(detail) => {
                    tracing::error!(error = %detail, "Prediction pipeline failed");
                    INTERNAL_ERROR_MESSAGE.to_string()
                }
                CoreError::ModelUnavailable => {
                    tracing::warn!("Prediction rejected: model not loaded");
                    core.to_string()
                }
                other => {
                    tracing::warn!(error = %other, "Rejected prediction request");
                    other.to_string()
                }
            },
            AppError::InvalidBody(_) => {
                tracing::warn!(error = %self, "Rejected request body");
                self.to_string()
            }
            AppError::BodyRejected(rejection) => {
                tracing::warn!(error = %rejection, "Request body rejected");
                rejection.body_text()
            }
            AppError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            AppError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            AppError::NotImplemented => NOT_IMPLEMENTED_MESSAGE.to_string(),
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        error_response(status, message)
    }
}
