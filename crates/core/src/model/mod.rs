//! The seam between the service and an externally trained regressor.
//!
//! A [`YieldModel`] is loaded once at startup and shared read-only across
//! request handlers, so implementations must be `Send + Sync`.

pub mod linear;

use std::path::PathBuf;

use crate::normalize::NormalizedRecord;

pub use linear::LinearModel;

/// Raw model output. Regressors return either a flat vector or a column
/// matrix depending on how they were exported.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl ModelOutput {
    /// First element regardless of dimensionality.
    pub fn first(&self) -> Option<f64> {
        match self {
            ModelOutput::Scalar(v) => Some(*v),
            ModelOutput::Vector(v) => v.first().copied(),
            ModelOutput::Matrix(rows) => rows.first().and_then(|row| row.first()).copied(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Artifact(String),

    #[error("feature '{0}' has the wrong type for this model")]
    FeatureType(String),
}

/// An opaque, pre-trained yield regressor.
pub trait YieldModel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Ordered feature columns the model was trained on.
    fn features(&self) -> &[String];

    /// Run inference on one normalized row.
    fn predict(&self, record: &NormalizedRecord) -> Result<ModelOutput, ModelError>;
}
