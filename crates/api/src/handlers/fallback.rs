use crate::error::AppError;

/// Fallback for paths that match no route.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
