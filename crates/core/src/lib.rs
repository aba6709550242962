//! Domain logic for crop yield prediction.
//!
//! Everything here is free of HTTP concerns: the crop/season catalog, the
//! versioned request schema, validation, normalization into the model's
//! column layout, the model seam, and the prediction service that composes
//! them.

pub mod catalog;
pub mod error;
pub mod model;
pub mod normalize;
pub mod prediction;
pub mod schema;
pub mod validation;

pub use error::CoreError;
pub use prediction::{ModelRegistry, PredictionResult, YieldService};
pub use schema::SchemaVariant;
