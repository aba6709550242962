//! Linear regressor loaded from a JSON artifact.
//!
//! The training pipeline exports the fitted one-hot encoder and regression
//! coefficients as:
//!
//! ```json
//! {
//!   "name": "crops_yield",
//!   "features": ["Crop", "Season", "State", "Annual_Rainfall", "..."],
//!   "intercept": 1.25,
//!   "numeric": { "Annual_Rainfall": 0.0004 },
//!   "categorical": { "Crop": { "Banana": 12.1, "Rice": 0.9 } }
//! }
//! ```
//!
//! Categories absent from the encoder contribute nothing.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::{ModelError, ModelOutput, YieldModel};
use crate::normalize::{FeatureValue, NormalizedRecord};

#[derive(Debug, Clone, Deserialize)]
struct LinearArtifact {
    name: String,
    features: Vec<String>,
    intercept: f64,
    #[serde(default)]
    numeric: HashMap<String, f64>,
    #[serde(default)]
    categorical: HashMap<String, HashMap<String, f64>>,
}

#[derive(Debug, Clone)]
pub struct LinearModel {
    artifact: LinearArtifact,
}

impl LinearModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: LinearArtifact = serde_json::from_str(text)?;
        Self::check(&artifact)?;
        Ok(Self { artifact })
    }

    /// Every coefficient must belong to a declared feature, and each feature
    /// must be either numeric or categorical, never both.
    fn check(artifact: &LinearArtifact) -> Result<(), ModelError> {
        if artifact.features.is_empty() {
            return Err(ModelError::Artifact("feature list is empty".into()));
        }
        if !artifact.intercept.is_finite() {
            return Err(ModelError::Artifact("intercept is not finite".into()));
        }
        let declared = |name: &String| artifact.features.iter().any(|f| f == name);

        for name in artifact.numeric.keys().chain(artifact.categorical.keys()) {
            if !declared(name) {
                return Err(ModelError::Artifact(format!(
                    "coefficient for undeclared feature '{name}'"
                )));
            }
        }
        if let Some(both) = artifact
            .numeric
            .keys()
            .find(|name| artifact.categorical.contains_key(*name))
        {
            return Err(ModelError::Artifact(format!(
                "feature '{both}' is both numeric and categorical"
            )));
        }
        Ok(())
    }
}

impl YieldModel for LinearModel {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn features(&self) -> &[String] {
        &self.artifact.features
    }

    fn predict(&self, record: &NormalizedRecord) -> Result<ModelOutput, ModelError> {
        let mut total = self.artifact.intercept;

        for (column, value) in record.iter() {
            match value {
                FeatureValue::Number(x) => {
                    if self.artifact.categorical.contains_key(column) {
                        return Err(ModelError::FeatureType(column.to_string()));
                    }
                    total += self.artifact.numeric.get(column).copied().unwrap_or(0.0) * x;
                }
                FeatureValue::Text(category) => {
                    if self.artifact.numeric.contains_key(column) {
                        return Err(ModelError::FeatureType(column.to_string()));
                    }
                    total += self
                        .artifact
                        .categorical
                        .get(column)
                        .and_then(|weights| weights.get(category))
                        .copied()
                        .unwrap_or(0.0);
                }
            }
        }

        Ok(ModelOutput::Vector(vec![total]))
    }
}
