/// Domain errors produced while turning a request body into a yield.
///
/// Every validation, normalization and invocation step returns
/// `Result<_, CoreError>`; the HTTP layer decides status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Model is not available. Please contact support.")]
    ModelUnavailable,

    #[error("No input data provided in request body.")]
    MissingInput,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("Missing required feature: '{0}'")]
    MalformedFeature(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
