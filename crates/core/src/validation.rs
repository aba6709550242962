//! Request validation, pure logic over the raw JSON object.
//!
//! The stages run in the order required → numeric → categorical and the
//! caller stops at the first failing stage. Only the required-field stage
//! aggregates; the others report the first offending field.

use serde_json::{Map, Value};

use crate::catalog::{self, CROPS, SEASONS};
use crate::error::CoreError;
use crate::schema::{NumericBound, CROP, SEASON};

/// Fail with every required field that is absent or `null`, in the order
/// given by `required_fields`.
pub fn validate_required_fields(
    data: &Map<String, Value>,
    required_fields: &[&str],
) -> Result<(), CoreError> {
    let missing: Vec<String> = required_fields
        .iter()
        .filter(|field| matches!(data.get(**field), None | Some(Value::Null)))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::MissingFields(missing))
    }
}

/// Check every numeric field that is present against its bound.
///
/// Absent or `null` fields are skipped; defaulting happens in the normalizer.
pub fn validate_numeric_fields(
    data: &Map<String, Value>,
    bounds: &[NumericBound],
) -> Result<(), CoreError> {
    for bound in bounds {
        let value = match data.get(bound.field) {
            None | Some(Value::Null) => continue,
            Some(v) => v,
        };
        let NumericBound {
            field,
            min,
            max,
            unit,
        } = *bound;

        let number = coerce_number(value).ok_or_else(|| {
            CoreError::Validation(format!("{field} must be a number, got {value}"))
        })?;
        if !number.is_finite() {
            return Err(CoreError::Validation(format!(
                "{field} must be a finite number, got {value}"
            )));
        }
        if number < min {
            return Err(CoreError::Validation(format!(
                "{field} must be at least {min} {unit}, got {value}"
            )));
        }
        if number > max {
            return Err(CoreError::Validation(format!(
                "{field} must be at most {max} {unit}, got {value}"
            )));
        }
    }
    Ok(())
}

/// Check `Season` and `Crop` against their closed vocabularies.
pub fn validate_categorical_fields(data: &Map<String, Value>) -> Result<(), CoreError> {
    check_membership(data, SEASON, SEASONS, catalog::is_known_season)?;
    check_membership(data, CROP, CROPS, catalog::is_known_crop)
}

fn check_membership(
    data: &Map<String, Value>,
    field: &str,
    accepted: &[&str],
    is_known: fn(&str) -> bool,
) -> Result<(), CoreError> {
    let raw = match data.get(field) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            return Err(CoreError::Validation(format!(
                "{field} must be a string, got {other}"
            )))
        }
    };

    if is_known(raw) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{raw}'. Accepted values: {}",
            accepted.join(", ")
        )))
    }
}

/// Coerce a JSON number, or a string holding one, to `f64`.
///
/// Booleans, arrays and objects are not numbers. Strings such as `"NaN"` or
/// `"inf"` coerce to non-finite values, which callers must reject.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
