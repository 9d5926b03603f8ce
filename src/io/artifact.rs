//! Read/write the persisted model/scaler artifact pair.
//!
//! The artifacts are the "portable" output of a training run:
//!
//! - `model.json`: regression weights + intercept, plus fit diagnostics
//! - `scaler.json`: per-feature mean/std pair
//!
//! Both carry the feature name list from the run that produced them, so a
//! mismatched pair (or a file from a different schema) is rejected at
//! load time instead of silently mis-pricing.

use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{LinearModel, TrainQuality, FEATURE_NAMES};
use crate::error::AppError;
use crate::math::FeatureScaler;

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";

/// On-disk schema of `model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub feature_names: Vec<String>,
    pub model: LinearModel,
    pub quality: TrainQuality,
}

/// On-disk schema of `scaler.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerFile {
    pub tool: String,
    pub feature_names: Vec<String>,
    pub scaler: FeatureScaler,
}

/// Write both artifacts of a training run into `dir`.
///
/// Returns the paths written, model first.
pub fn write_artifacts(
    dir: &Path,
    model: &LinearModel,
    scaler: &FeatureScaler,
    quality: &TrainQuality,
) -> Result<(PathBuf, PathBuf), AppError> {
    create_dir_all(dir).map_err(|e| {
        AppError::usage(format!(
            "Failed to create artifact dir '{}': {e}",
            dir.display()
        ))
    })?;

    let feature_names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();

    let model_path = dir.join(MODEL_FILE);
    let model_file = ModelFile {
        tool: "homeval".to_string(),
        feature_names: feature_names.clone(),
        model: model.clone(),
        quality: quality.clone(),
    };
    write_json(&model_path, &model_file)?;

    let scaler_path = dir.join(SCALER_FILE);
    let scaler_file = ScalerFile {
        tool: "homeval".to_string(),
        feature_names,
        scaler: scaler.clone(),
    };
    write_json(&scaler_path, &scaler_file)?;

    Ok((model_path, scaler_path))
}

/// Load the artifact pair from `dir`, checking pair consistency.
pub fn load_artifacts(dir: &Path) -> Result<(LinearModel, FeatureScaler), AppError> {
    let model_file: ModelFile = read_json(&dir.join(MODEL_FILE))?;
    let scaler_file: ScalerFile = read_json(&dir.join(SCALER_FILE))?;

    if model_file.model.weights.len() != model_file.feature_names.len() {
        return Err(AppError::usage(format!(
            "Corrupt model artifact: {} weights for {} features.",
            model_file.model.weights.len(),
            model_file.feature_names.len()
        )));
    }
    if scaler_file.scaler.width() != scaler_file.feature_names.len()
        || scaler_file.scaler.means.len() != scaler_file.scaler.stds.len()
    {
        return Err(AppError::usage(
            "Corrupt scaler artifact: mean/std lengths disagree with feature list.",
        ));
    }
    if model_file.feature_names != scaler_file.feature_names {
        return Err(AppError::usage(
            "Mismatched artifact pair: model and scaler were produced from different feature sets.",
        ));
    }

    Ok((model_file.model, scaler_file.scaler))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::usage(format!("Failed to write '{}': {e}", path.display())))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid artifact '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (LinearModel, FeatureScaler, TrainQuality) {
        (
            LinearModel {
                weights: vec![50_000.0, 20_000.0, 8_000.0, 12_000.0],
                intercept: 180_000.0,
            },
            FeatureScaler {
                means: vec![1500.0, 6.0, 1.8, 1000.0],
                stds: vec![500.0, 1.4, 0.7, 400.0],
            },
            TrainQuality {
                train_rmse: 30_000.0,
                holdout_rmse: Some(35_000.0),
                n_train: 80,
                n_holdout: 20,
            },
        )
    }

    #[test]
    fn pair_survives_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let (model, scaler, quality) = fixture();

        write_artifacts(dir.path(), &model, &scaler, &quality).unwrap();
        let (loaded_model, loaded_scaler) = load_artifacts(dir.path()).unwrap();

        assert_eq!(loaded_model.weights, model.weights);
        assert_eq!(loaded_model.intercept, model.intercept);
        assert_eq!(loaded_scaler.means, scaler.means);
        assert_eq!(loaded_scaler.stds, scaler.stds);
    }

    #[test]
    fn missing_scaler_fails_the_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (model, scaler, quality) = fixture();

        write_artifacts(dir.path(), &model, &scaler, &quality).unwrap();
        std::fs::remove_file(dir.path().join(SCALER_FILE)).unwrap();

        let err = load_artifacts(dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
