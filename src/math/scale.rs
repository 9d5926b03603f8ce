//! Per-feature standardization.
//!
//! The regression is fit on zero-mean/unit-variance features, so the exact
//! same transform must be applied at inference time. The fitted means and
//! standard deviations are therefore persisted next to the model and
//! treated as one half of an artifact pair.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fitted per-feature mean / standard deviation pair.
///
/// Standard deviations are population (biased) estimates, matching the
/// distribution the regression weights were calibrated against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl FeatureScaler {
    /// Fit means and standard deviations from raw feature rows.
    ///
    /// All rows must have the same width. A zero-variance feature keeps a
    /// divisor of 1.0 so it passes through centered instead of producing
    /// NaNs.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, AppError> {
        let Some(first) = rows.first() else {
            return Err(AppError::data("Cannot fit a scaler on zero rows."));
        };
        let width = first.len();
        if width == 0 {
            return Err(AppError::data("Cannot fit a scaler on empty rows."));
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(AppError::internal("Ragged feature rows passed to scaler fit."));
        }

        let n = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in rows {
            for (m, x) in means.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut vars = vec![0.0; width];
        for row in rows {
            for ((v, x), m) in vars.iter_mut().zip(row).zip(&means) {
                let d = x - m;
                *v += d * d;
            }
        }

        let stds = vars
            .into_iter()
            .map(|v| {
                let s = (v / n).sqrt();
                if s > 0.0 { s } else { 1.0 }
            })
            .collect();

        Ok(Self { means, stds })
    }

    /// Number of features this scaler was fit on.
    pub fn width(&self) -> usize {
        self.means.len()
    }

    /// Standardize one feature row.
    ///
    /// `row` must match the fitted width; callers build rows from
    /// `FEATURE_NAMES`, so lengths always agree.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((x, m), s)| (x - m) / s)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_transform_is_zero_mean_unit_variance() {
        let rows = vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
            vec![4.0, 40.0],
        ];
        let scaler = FeatureScaler::fit(&rows).unwrap();

        let scaled: Vec<Vec<f64>> = rows.iter().map(|r| scaler.transform_row(r)).collect();

        for col in 0..2 {
            let n = scaled.len() as f64;
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / n;
            let var: f64 = scaled.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_variance_feature_passes_through_centered() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = FeatureScaler::fit(&rows).unwrap();

        let scaled = scaler.transform_row(&[5.0, 2.0]);
        assert!(scaled[0].abs() < 1e-12);
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn fit_rejects_empty_input() {
        assert!(FeatureScaler::fit(&[]).is_err());
    }
}
