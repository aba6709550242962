//! Routes normalized records to a model and shapes the result.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog;
use crate::error::CoreError;
use crate::model::YieldModel;
use crate::normalize::{self, NormalizedRecord};
use crate::schema::{SchemaVariant, AREA, CROP, SEASON, STATE};
use crate::validation::{
    validate_categorical_fields, validate_numeric_fields, validate_required_fields,
};

pub const UNIT_TONS: &str = "tons/hectare";
pub const UNIT_NUTS: &str = "nuts/hectare";

/// The models a deployment serves, shaped by its schema variant.
#[derive(Clone)]
pub enum ModelRegistry {
    Legacy {
        model: Arc<dyn YieldModel>,
    },
    Current {
        crops: Arc<dyn YieldModel>,
        coconut: Arc<dyn YieldModel>,
    },
}

impl ModelRegistry {
    pub fn variant(&self) -> SchemaVariant {
        match self {
            ModelRegistry::Legacy { .. } => SchemaVariant::Legacy,
            ModelRegistry::Current { .. } => SchemaVariant::Current,
        }
    }

    /// Pick the model for a record and report whether it is the coconut one.
    fn select(&self, record: &NormalizedRecord, crop: &str) -> (&dyn YieldModel, bool) {
        match self {
            ModelRegistry::Legacy { model } => (model.as_ref(), false),
            ModelRegistry::Current { crops, coconut } => {
                if catalog::is_coconut(crop) && !record.has_column(CROP) {
                    (coconut.as_ref(), true)
                } else {
                    (crops.as_ref(), false)
                }
            }
        }
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelRegistry::Legacy { model } => f
                .debug_struct("Legacy")
                .field("model", &model.name())
                .finish(),
            ModelRegistry::Current { crops, coconut } => f
                .debug_struct("Current")
                .field("crops", &crops.name())
                .field("coconut", &coconut.name())
                .finish(),
        }
    }
}

/// Echo of the request, shaped per variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputSummary {
    Current {
        crop: String,
        season: String,
        state: String,
    },
    Legacy {
        crop: String,
        season: String,
        /// `Area` exactly as the caller sent it.
        area: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(rename = "yield")]
    pub yield_value: f64,
    pub unit: &'static str,
    pub input_summary: InputSummary,
}

/// Immutable prediction context built once at startup.
///
/// `models` is `None` when loading failed; that condition lasts for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct YieldService {
    variant: SchemaVariant,
    models: Option<ModelRegistry>,
}

impl YieldService {
    pub fn new(variant: SchemaVariant, models: Option<ModelRegistry>) -> Result<Self, CoreError> {
        if let Some(registry) = &models {
            if registry.variant() != variant {
                return Err(CoreError::Internal(format!(
                    "models were loaded for the {} schema but the service is configured for {}",
                    registry.variant(),
                    variant
                )));
            }
        }
        Ok(Self { variant, models })
    }

    pub fn unavailable(variant: SchemaVariant) -> Self {
        Self {
            variant,
            models: None,
        }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn is_loaded(&self) -> bool {
        self.models.is_some()
    }

    /// Full pipeline from raw body to result.
    ///
    /// Model availability is checked before the body is looked at.
    pub fn predict(&self, body: Option<&Value>) -> Result<PredictionResult, CoreError> {
        let models = self.models.as_ref().ok_or(CoreError::ModelUnavailable)?;
        let data = request_object(body)?;

        validate_required_fields(data, self.variant.required_fields())?;
        validate_numeric_fields(data, self.variant.numeric_bounds())?;
        validate_categorical_fields(data)?;

        let record = normalize::normalize(data, self.variant)?;
        tracing::debug!(record = ?record, "Normalized prediction input");

        self.invoke(models, data, &record)
    }

    fn invoke(
        &self,
        models: &ModelRegistry,
        data: &Map<String, Value>,
        record: &NormalizedRecord,
    ) -> Result<PredictionResult, CoreError> {
        let crop = trimmed(data, CROP);
        let (model, is_coconut) = models.select(record, &crop);

        let expected = model.features();
        let actual = record.column_names();
        if expected.len() != actual.len() || expected.iter().zip(&actual).any(|(e, a)| e != a) {
            return Err(CoreError::Internal(format!(
                "model '{}' expects columns {:?} but the record has {:?}",
                model.name(),
                expected,
                actual
            )));
        }

        let output = model
            .predict(record)
            .map_err(|e| CoreError::Prediction(format!("model '{}': {e}", model.name())))?;
        let raw = output.first().ok_or_else(|| {
            CoreError::Prediction(format!("model '{}' returned no values", model.name()))
        })?;
        if !raw.is_finite() {
            return Err(CoreError::Prediction(format!(
                "model '{}' returned a non-finite value",
                model.name()
            )));
        }

        let yield_value = round_to(raw, self.variant.precision());
        let unit = if is_coconut { UNIT_NUTS } else { UNIT_TONS };
        tracing::info!(model = model.name(), %crop, yield_value, unit, "Prediction successful");

        Ok(PredictionResult {
            yield_value,
            unit,
            input_summary: self.summary(data, record, crop),
        })
    }

    fn summary(
        &self,
        data: &Map<String, Value>,
        record: &NormalizedRecord,
        crop: String,
    ) -> InputSummary {
        let season = record
            .text(SEASON)
            .map(str::to_string)
            .unwrap_or_else(|| trimmed(data, SEASON));
        match self.variant {
            SchemaVariant::Current => InputSummary::Current {
                crop,
                season,
                state: record.text(STATE).unwrap_or(catalog::DEFAULT_STATE).to_string(),
            },
            SchemaVariant::Legacy => InputSummary::Legacy {
                crop,
                season,
                area: data.get(AREA).cloned().unwrap_or(Value::Null),
            },
        }
    }
}

/// The body must be a non-empty JSON object.
fn request_object(body: Option<&Value>) -> Result<&Map<String, Value>, CoreError> {
    match body {
        None | Some(Value::Null) => Err(CoreError::MissingInput),
        Some(Value::Object(map)) if map.is_empty() => Err(CoreError::MissingInput),
        Some(Value::Object(map)) => Ok(map),
        Some(Value::Array(items)) if items.is_empty() => Err(CoreError::MissingInput),
        Some(other) => Err(CoreError::InvalidFormat(format!(
            "expected a JSON object, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn trimmed(data: &Map<String, Value>, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelError, ModelOutput};
    use crate::schema::{ANNUAL_RAINFALL, SEASON};
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::sync::Mutex;

    /// Test double recording the columns it was called with.
    struct FixedModel {
        name: &'static str,
        features: Vec<String>,
        output: ModelOutput,
        seen: Mutex<Vec<Vec<&'static str>>>,
    }

    impl FixedModel {
        fn new(name: &'static str, columns: &[&str], output: ModelOutput) -> Arc<Self> {
            Arc::new(Self {
                name,
                features: columns.iter().map(|c| c.to_string()).collect(),
                output,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Vec<&'static str>> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl YieldModel for FixedModel {
        fn name(&self) -> &str {
            self.name
        }

        fn features(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, record: &NormalizedRecord) -> Result<ModelOutput, ModelError> {
            self.seen.lock().unwrap().push(record.column_names());
            Ok(self.output.clone())
        }
    }

    fn current_service(
        crops_out: ModelOutput,
        coconut_out: ModelOutput,
    ) -> (YieldService, Arc<FixedModel>, Arc<FixedModel>) {
        let crops = FixedModel::new("crops", SchemaVariant::Current.columns(), crops_out);
        let coconut = FixedModel::new(
            "coconut",
            SchemaVariant::Current.coconut_columns().unwrap(),
            coconut_out,
        );
        let registry = ModelRegistry::Current {
            crops: crops.clone(),
            coconut: coconut.clone(),
        };
        let service = YieldService::new(SchemaVariant::Current, Some(registry)).unwrap();
        (service, crops, coconut)
    }

    fn banana() -> Value {
        json!({
            "Crop": "Banana",
            "Season": "Kharif",
            "State": "Odisha",
            "Annual_Rainfall": 1200,
            "Fertilizer_Per_Hectare": 50,
            "Pesticide_Per_Hectare": 2
        })
    }

    #[test]
    fn banana_uses_crops_model_and_six_decimals() {
        let (service, crops, coconut) = current_service(
            ModelOutput::Vector(vec![23.123456789]),
            ModelOutput::Vector(vec![0.0]),
        );
        let result = service.predict(Some(&banana())).unwrap();

        assert_eq!(result.yield_value, 23.123457);
        assert_eq!(result.unit, UNIT_TONS);
        assert_eq!(
            result.input_summary,
            InputSummary::Current {
                crop: "Banana".into(),
                season: "Kharif".into(),
                state: "Odisha".into(),
            }
        );
        assert_eq!(crops.calls().len(), 1);
        assert!(coconut.calls().is_empty());
    }

    #[test]
    fn coconut_any_case_uses_coconut_model_without_crop_column() {
        let (service, crops, coconut) = current_service(
            ModelOutput::Vector(vec![1.0]),
            ModelOutput::Matrix(vec![vec![8123.5]]),
        );
        let mut body = banana();
        body["Crop"] = json!("cOcOnUt");

        let result = service.predict(Some(&body)).unwrap();

        assert_eq!(result.unit, UNIT_NUTS);
        assert_eq!(result.yield_value, 8123.5);
        assert!(crops.calls().is_empty());
        let calls = coconut.calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].contains(&CROP));
    }

    #[test]
    fn unavailable_models_short_circuit_before_validation() {
        let service = YieldService::unavailable(SchemaVariant::Current);
        assert!(!service.is_loaded());
        assert_matches!(service.predict(None), Err(CoreError::ModelUnavailable));
        assert_matches!(
            service.predict(Some(&json!({"Crop": 1}))),
            Err(CoreError::ModelUnavailable)
        );
    }

    #[test]
    fn empty_bodies_are_missing_input() {
        let (service, _, _) =
            current_service(ModelOutput::Scalar(1.0), ModelOutput::Scalar(1.0));
        assert_matches!(service.predict(None), Err(CoreError::MissingInput));
        assert_matches!(service.predict(Some(&json!({}))), Err(CoreError::MissingInput));
        assert_matches!(service.predict(Some(&Value::Null)), Err(CoreError::MissingInput));
        assert_matches!(
            service.predict(Some(&json!(42))),
            Err(CoreError::InvalidFormat(_))
        );
    }

    #[test]
    fn stages_short_circuit_in_order() {
        let (service, crops, _) =
            current_service(ModelOutput::Scalar(1.0), ModelOutput::Scalar(1.0));

        let mut body = banana();
        body[ANNUAL_RAINFALL] = json!(-1);
        body[SEASON] = json!("Monsoon");
        let err = service.predict(Some(&body)).unwrap_err();
        assert!(err.to_string().contains("Annual_Rainfall must be at least 0"));

        body.as_object_mut().unwrap().remove("Crop");
        assert_matches!(
            service.predict(Some(&body)),
            Err(CoreError::MissingFields(f)) if f == ["Crop"]
        );
        assert!(crops.calls().is_empty());
    }

    #[test]
    fn empty_or_non_finite_output_is_a_prediction_error() {
        let (service, _, _) =
            current_service(ModelOutput::Vector(vec![]), ModelOutput::Scalar(1.0));
        assert_matches!(
            service.predict(Some(&banana())),
            Err(CoreError::Prediction(_))
        );

        let (service, _, _) =
            current_service(ModelOutput::Scalar(f64::NAN), ModelOutput::Scalar(1.0));
        assert_matches!(
            service.predict(Some(&banana())),
            Err(CoreError::Prediction(_))
        );
    }

    #[test]
    fn column_mismatch_is_internal() {
        let crops = FixedModel::new(
            "crops",
            &["Season", "Crop", "State", "Annual_Rainfall", "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"],
            ModelOutput::Scalar(1.0),
        );
        let coconut = FixedModel::new("coconut", &[], ModelOutput::Scalar(1.0));
        let registry = ModelRegistry::Current {
            crops: crops.clone(),
            coconut,
        };
        let service = YieldService::new(SchemaVariant::Current, Some(registry)).unwrap();

        assert_matches!(service.predict(Some(&banana())), Err(CoreError::Internal(_)));
        assert!(crops.calls().is_empty());
    }

    #[test]
    fn legacy_single_model_rounds_to_four_places() {
        let model = FixedModel::new(
            "yield_predictor",
            SchemaVariant::Legacy.columns(),
            ModelOutput::Vector(vec![2.718281828]),
        );
        let registry = ModelRegistry::Legacy {
            model: model.clone(),
        };
        let service = YieldService::new(SchemaVariant::Legacy, Some(registry)).unwrap();

        let mut body = banana();
        body["Crop"] = json!("Coconut");
        body["Area"] = json!("12.5");
        let result = service.predict(Some(&body)).unwrap();

        assert_eq!(result.yield_value, 2.7183);
        assert_eq!(result.unit, UNIT_TONS);
        assert_eq!(
            result.input_summary,
            InputSummary::Legacy {
                crop: "Coconut".into(),
                season: "Kharif".into(),
                area: json!("12.5"),
            }
        );
        assert!(model.calls()[0].contains(&CROP));
    }

    #[test]
    fn registry_must_match_configured_variant() {
        let model = FixedModel::new("m", SchemaVariant::Legacy.columns(), ModelOutput::Scalar(1.0));
        let registry = ModelRegistry::Legacy { model };
        assert_matches!(
            YieldService::new(SchemaVariant::Current, Some(registry)),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn result_serializes_yield_key() {
        let result = PredictionResult {
            yield_value: 1.5,
            unit: UNIT_TONS,
            input_summary: InputSummary::Current {
                crop: "Rice".into(),
                season: "Rabi".into(),
                state: "Odisha".into(),
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["yield"], 1.5);
        assert_eq!(json["input_summary"]["state"], "Odisha");
    }

    #[test]
    fn round_to_behaves() {
        assert_eq!(round_to(1.23456789, 4), 1.2346);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(3.0, 6), 3.0);
    }
}
