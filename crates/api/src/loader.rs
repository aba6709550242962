//! Startup model loading.
//!
//! A failed load is not fatal: the server still starts, reports the model as
//! not loaded, and answers prediction requests with 503 until restarted.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use yieldcast_core::model::LinearModel;
use yieldcast_core::{ModelRegistry, SchemaVariant, YieldService};

pub const LEGACY_MODEL_FILE: &str = "yield_predictor.json";
pub const CROPS_MODEL_FILE: &str = "crops_yield_model.json";
pub const COCONUT_MODEL_FILE: &str = "coconut_yield_model.json";

/// Load every artifact the variant needs from `model_dir`.
pub fn load_registry(model_dir: &Path, variant: SchemaVariant) -> anyhow::Result<ModelRegistry> {
    let registry = match variant {
        SchemaVariant::Legacy => ModelRegistry::Legacy {
            model: load_one(model_dir, LEGACY_MODEL_FILE)?,
        },
        SchemaVariant::Current => ModelRegistry::Current {
            crops: load_one(model_dir, CROPS_MODEL_FILE)?,
            coconut: load_one(model_dir, COCONUT_MODEL_FILE)?,
        },
    };
    Ok(registry)
}

fn load_one(model_dir: &Path, file: &str) -> anyhow::Result<Arc<LinearModel>> {
    let path = model_dir.join(file);
    tracing::info!(path = %path.display(), "Loading model artifact");
    let model = LinearModel::from_path(&path)
        .with_context(|| format!("failed to load model from {}", path.display()))?;
    Ok(Arc::new(model))
}

/// Build the prediction service, degrading to "not loaded" on failure.
pub fn build_service(model_dir: &Path, variant: SchemaVariant) -> YieldService {
    match load_registry(model_dir, variant) {
        Ok(registry) => {
            tracing::info!(?registry, schema = %variant, "Models loaded successfully");
            YieldService::new(variant, Some(registry)).unwrap_or_else(|e| {
                tracing::error!(error = %e, schema = %variant, "Loaded models rejected; predictions disabled");
                YieldService::unavailable(variant)
            })
        }
        Err(e) => {
            tracing::error!(error = ?e, schema = %variant, "Model failed to load; predictions disabled");
            YieldService::unavailable(variant)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS_CURRENT: &str = r#"["Crop", "Season", "State", "Annual_Rainfall",
        "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"]"#;

    fn write_model(dir: &Path, file: &str, features: &str) {
        let body = format!(r#"{{ "name": "{file}", "features": {features}, "intercept": 1.0 }}"#);
        std::fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn current_variant_needs_both_models() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), CROPS_MODEL_FILE, COLUMNS_CURRENT);

        let err = load_registry(dir.path(), SchemaVariant::Current).unwrap_err();
        assert!(format!("{err:#}").contains(COCONUT_MODEL_FILE));
        assert!(!build_service(dir.path(), SchemaVariant::Current).is_loaded());
    }

    #[test]
    fn loads_current_variant() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), CROPS_MODEL_FILE, COLUMNS_CURRENT);
        write_model(
            dir.path(),
            COCONUT_MODEL_FILE,
            r#"["Season", "State", "Annual_Rainfall", "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"]"#,
        );

        let service = build_service(dir.path(), SchemaVariant::Current);
        assert!(service.is_loaded());
        assert_eq!(service.variant(), SchemaVariant::Current);
    }

    #[test]
    fn loads_legacy_variant_from_single_file() {
        let dir = tempfile::tempdir().unwrap();
        write_model(
            dir.path(),
            LEGACY_MODEL_FILE,
            r#"["Crop", "Season", "State", "Area", "Annual_Rainfall",
                "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"]"#,
        );
        let registry = load_registry(dir.path(), SchemaVariant::Legacy).unwrap();
        assert_eq!(registry.variant(), SchemaVariant::Legacy);
    }

    #[test]
    fn shipped_artifacts_load_with_schema_columns() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");

        match load_registry(&dir, SchemaVariant::Legacy).unwrap() {
            ModelRegistry::Legacy { model } => {
                assert_eq!(model.features(), SchemaVariant::Legacy.columns());
            }
            other => panic!("unexpected registry {other:?}"),
        }

        match load_registry(&dir, SchemaVariant::Current).unwrap() {
            ModelRegistry::Current { crops, coconut } => {
                assert_eq!(crops.features(), SchemaVariant::Current.columns());
                assert_eq!(
                    coconut.features(),
                    SchemaVariant::Current.coconut_columns().unwrap()
                );
            }
            other => panic!("unexpected registry {other:?}"),
        }

        assert!(build_service(&dir, SchemaVariant::Legacy).is_loaded());
        assert!(build_service(&dir, SchemaVariant::Current).is_loaded());
    }
}
