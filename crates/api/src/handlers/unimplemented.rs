//! Reserved feature routes.
//!
//! These never read the request body, so the answer is the same 501 for any
//! payload.

use crate::error::AppError;

/// POST /api/v1/crops/recommend
pub async fn recommend_crop() -> AppError {
    AppError::NotImplemented
}

/// POST /api/v1/fertilizers/recommend
pub async fn recommend_fertilizer() -> AppError {
    AppError::NotImplemented
}

/// POST /api/v1/pests/identify
pub async fn identify_pest() -> AppError {
    AppError::NotImplemented
}
