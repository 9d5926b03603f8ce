//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during training and estimation
//! - persisted as JSON artifacts
//! - reloaded later by the request handler

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A submitted request: field name -> raw string value.
///
/// Everything the online step receives arrives through this map; all
/// numeric interpretation happens behind explicit parse boundaries.
pub type FieldMap = HashMap<String, String>;

/// Model feature columns, in design-matrix order.
///
/// The request form only collects the first two; the remaining two are
/// filled with fixed placeholder values at inference time (see `pricing`).
pub const FEATURE_NAMES: [&str; 4] = [
    "living_area",
    "overall_quality",
    "garage_capacity",
    "basement_area",
];

/// A clean training row after ingest (no missing values).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub living_area: f64,
    pub overall_quality: f64,
    pub garage_capacity: f64,
    pub basement_area: f64,
    pub sale_price: f64,
}

impl TrainingRecord {
    /// Feature values in `FEATURE_NAMES` order.
    pub fn features(&self) -> [f64; 4] {
        [
            self.living_area,
            self.overall_quality,
            self.garage_capacity,
            self.basement_area,
        ]
    }
}

/// Fitted linear regression parameters.
///
/// Inference parameters only: one weight per feature plus an intercept.
/// Immutable once written by the training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Predict a sale price from an already-scaled feature vector.
    ///
    /// `features` must have one value per weight, in `FEATURE_NAMES`
    /// order; callers build the vector from that list, so lengths always
    /// agree.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut y = self.intercept;
        for (w, x) in self.weights.iter().zip(features) {
            y += w * x;
        }
        y
    }
}

/// Fit diagnostics reported by the training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainQuality {
    pub train_rmse: f64,
    /// RMSE on the held-out split; `None` when the dataset is too small
    /// to carve one out.
    pub holdout_rmse: Option<f64>,
    pub n_train: usize,
    pub n_holdout: usize,
}

/// A training run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub csv_path: PathBuf,
    pub out_dir: PathBuf,
    /// Fraction of rows held out for evaluation (not used for fitting).
    pub holdout: f64,
    /// Seed for the deterministic split shuffle.
    pub seed: u64,
}

/// Configuration for synthetic dataset generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_path: PathBuf,
    pub count: usize,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_is_dot_plus_intercept() {
        let model = LinearModel {
            weights: vec![2.0, -1.0, 0.5, 0.0],
            intercept: 10.0,
        };
        let y = model.predict(&[1.0, 2.0, 4.0, 100.0]);
        assert!((y - (10.0 + 2.0 - 2.0 + 2.0)).abs() < 1e-12);
    }
}
