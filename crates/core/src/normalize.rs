//! Builds the fixed-shape record a yield model consumes.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{self, DEFAULT_STATE};
use crate::error::CoreError;
use crate::schema::{SchemaVariant, CROP, SEASON, STATE};
use crate::validation::coerce_number;

/// One cell of a normalized record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

/// A single row with named columns in model order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    columns: Vec<(&'static str, FeatureValue)>,
}

impl NormalizedRecord {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            FeatureValue::Text(s) => Some(s),
            FeatureValue::Number(_) => None,
        }
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        match self.get(column)? {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        self.columns.iter().map(|(name, value)| (*name, value))
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.get(column).is_some()
    }
}

/// Normalize a validated request body into the variant's column layout.
///
/// Strings are trimmed and `State` defaults to `Odisha`. In the current
/// variant a coconut request yields a record without the `Crop` column.
pub fn normalize(
    data: &Map<String, Value>,
    variant: SchemaVariant,
) -> Result<NormalizedRecord, CoreError> {
    let crop = text_field(data, CROP, "")?;
    let coconut_layout = match variant.coconut_columns() {
        Some(cols) if catalog::is_coconut(&crop) => Some(cols),
        _ => None,
    };
    let layout = coconut_layout.unwrap_or_else(|| variant.columns());

    let mut columns = Vec::with_capacity(layout.len());
    for &column in layout {
        let value = match column {
            CROP => FeatureValue::Text(crop.clone()),
            SEASON => FeatureValue::Text(text_field(data, SEASON, "")?),
            STATE => FeatureValue::Text(text_field(data, STATE, DEFAULT_STATE)?),
            _ => FeatureValue::Number(numeric_field(data, column, variant)?),
        };
        columns.push((column, value));
    }

    Ok(NormalizedRecord { columns })
}

fn text_field(data: &Map<String, Value>, field: &str, default: &str) -> Result<String, CoreError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(CoreError::InvalidFormat(format!(
            "{field} must be a string, got {other}"
        ))),
    }
}

fn numeric_field(
    data: &Map<String, Value>,
    field: &'static str,
    variant: SchemaVariant,
) -> Result<f64, CoreError> {
    match data.get(field) {
        None | Some(Value::Null) if variant.defaults_missing_numerics() => Ok(0.0),
        None | Some(Value::Null) => Err(CoreError::MalformedFeature(field.to_string())),
        Some(value) => coerce_number(value).ok_or_else(|| {
            CoreError::InvalidFormat(format!(
                "could not convert {field} value {value} to float"
            ))
        }),
    }
}
