//! Versioned request/model contracts.
//!
//! A deployment serves exactly one [`SchemaVariant`]. The two variants are
//! incompatible wire contracts and their behaviours are never combined.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const CROP: &str = "Crop";
pub const SEASON: &str = "Season";
pub const STATE: &str = "State";
pub const AREA: &str = "Area";
pub const ANNUAL_RAINFALL: &str = "Annual_Rainfall";
pub const FERTILIZER_PER_HECTARE: &str = "Fertilizer_Per_Hectare";
pub const PESTICIDE_PER_HECTARE: &str = "Pesticide_Per_Hectare";

/// Inclusive range accepted for a numeric request field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBound {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

pub const AREA_BOUND: NumericBound = NumericBound {
    field: AREA,
    min: 0.01,
    max: 100_000.0,
    unit: "ha",
};

pub const RAINFALL_BOUND: NumericBound = NumericBound {
    field: ANNUAL_RAINFALL,
    min: 0.0,
    max: 15_000.0,
    unit: "mm",
};

pub const FERTILIZER_BOUND: NumericBound = NumericBound {
    field: FERTILIZER_PER_HECTARE,
    min: 0.0,
    max: 1_000.0,
    unit: "kg/ha",
};

pub const PESTICIDE_BOUND: NumericBound = NumericBound {
    field: PESTICIDE_PER_HECTARE,
    min: 0.0,
    max: 100.0,
    unit: "kg/ha",
};

/// Which generation of the prediction contract is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Single general model, `Area` required, 4-decimal yields.
    Legacy,
    /// Crops model plus a coconut model, no `Area`, 6-decimal yields.
    #[default]
    Current,
}

impl SchemaVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVariant::Legacy => "legacy",
            SchemaVariant::Current => "current",
        }
    }

    /// Fields that must be present and non-null in the request body.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Legacy => &[
                CROP,
                SEASON,
                AREA,
                ANNUAL_RAINFALL,
                FERTILIZER_PER_HECTARE,
                PESTICIDE_PER_HECTARE,
            ],
            SchemaVariant::Current => &[
                CROP,
                SEASON,
                ANNUAL_RAINFALL,
                FERTILIZER_PER_HECTARE,
                PESTICIDE_PER_HECTARE,
            ],
        }
    }

    /// Range checks applied to numeric fields, in column order.
    pub fn numeric_bounds(self) -> &'static [NumericBound] {
        match self {
            SchemaVariant::Legacy => &[
                AREA_BOUND,
                RAINFALL_BOUND,
                FERTILIZER_BOUND,
                PESTICIDE_BOUND,
            ],
            SchemaVariant::Current => &[RAINFALL_BOUND, FERTILIZER_BOUND, PESTICIDE_BOUND],
        }
    }

    /// Column order of the record fed to the general model.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Legacy => &[
                CROP,
                SEASON,
                STATE,
                AREA,
                ANNUAL_RAINFALL,
                FERTILIZER_PER_HECTARE,
                PESTICIDE_PER_HECTARE,
            ],
            SchemaVariant::Current => &[
                CROP,
                SEASON,
                STATE,
                ANNUAL_RAINFALL,
                FERTILIZER_PER_HECTARE,
                PESTICIDE_PER_HECTARE,
            ],
        }
    }

    /// Column order of the record fed to the coconut model, if the variant
    /// has one.
    pub fn coconut_columns(self) -> Option<&'static [&'static str]> {
        match self {
            SchemaVariant::Legacy => None,
            SchemaVariant::Current => Some(&[
                SEASON,
                STATE,
                ANNUAL_RAINFALL,
                FERTILIZER_PER_HECTARE,
                PESTICIDE_PER_HECTARE,
            ]),
        }
    }

    /// Whether the normalizer substitutes `0.0` for absent numeric fields.
    pub fn defaults_missing_numerics(self) -> bool {
        matches!(self, SchemaVariant::Legacy)
    }

    /// Decimal places the reported yield is rounded to.
    pub fn precision(self) -> u32 {
        match self {
            SchemaVariant::Legacy => 4,
            SchemaVariant::Current => 6,
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(SchemaVariant::Legacy),
            "current" => Ok(SchemaVariant::Current),
            other => Err(CoreError::InvalidFormat(format!(
                "unknown schema variant '{other}', expected 'legacy' or 'current'"
            ))),
        }
    }
}
