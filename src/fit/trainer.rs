//! Fit the scaler + regression from ingested training data.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{LinearModel, TrainConfig, TrainQuality, TrainingRecord, FEATURE_NAMES};
use crate::error::AppError;
use crate::io::ingest::TrainingData;
use crate::math::{solve_least_squares, FeatureScaler};

/// Parameters of the regression: one weight per feature plus intercept.
const PARAM_COUNT: usize = FEATURE_NAMES.len() + 1;

/// Minimum number of extra training rows beyond parameter count.
const MIN_N_BUFFER: usize = 5;

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct TrainOutput {
    pub model: LinearModel,
    pub scaler: FeatureScaler,
    pub quality: TrainQuality,
}

/// Run the full training step: split, scale, fit, evaluate.
///
/// The scaler is fit on the training split only and the holdout rows are
/// transformed through it unchanged, mirroring what inference does.
pub fn train(data: &TrainingData, config: &TrainConfig) -> Result<TrainOutput, AppError> {
    if !(config.holdout.is_finite() && (0.0..1.0).contains(&config.holdout)) {
        return Err(AppError::usage("Holdout fraction must be in [0, 1)."));
    }

    let n = data.records.len();
    let n_holdout = ((n as f64) * config.holdout).round() as usize;
    let n_train = n - n_holdout;
    if n_train < PARAM_COUNT + MIN_N_BUFFER {
        return Err(AppError::data(format!(
            "Not enough usable rows to fit: {n_train} training rows for {PARAM_COUNT} parameters \
             (need at least {}).",
            PARAM_COUNT + MIN_N_BUFFER
        )));
    }

    let (train_idx, holdout_idx) = split_indices(n, n_holdout, config.seed);

    let train_rows: Vec<&TrainingRecord> = train_idx.iter().map(|&i| &data.records[i]).collect();
    let holdout_rows: Vec<&TrainingRecord> =
        holdout_idx.iter().map(|&i| &data.records[i]).collect();

    let feature_rows: Vec<Vec<f64>> = train_rows.iter().map(|r| r.features().to_vec()).collect();
    let scaler = FeatureScaler::fit(&feature_rows)?;

    let model = fit_ols(&train_rows, &scaler)?;

    let train_rmse = rmse(&model, &scaler, &train_rows);
    let holdout_rmse = if holdout_rows.is_empty() {
        None
    } else {
        Some(rmse(&model, &scaler, &holdout_rows))
    };

    log::info!(
        "fit complete: n_train={n_train} n_holdout={n_holdout} train_rmse={train_rmse:.1}"
    );

    Ok(TrainOutput {
        model,
        scaler,
        quality: TrainQuality {
            train_rmse,
            holdout_rmse,
            n_train,
            n_holdout,
        },
    })
}

/// Deterministic split: seeded shuffle, first `n_holdout` indices held out.
fn split_indices(n: usize, n_holdout: usize, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let holdout = indices[..n_holdout].to_vec();
    let train = indices[n_holdout..].to_vec();
    (train, holdout)
}

fn fit_ols(rows: &[&TrainingRecord], scaler: &FeatureScaler) -> Result<LinearModel, AppError> {
    let n = rows.len();

    // Design matrix: leading constant column, then scaled features.
    let mut design = Vec::with_capacity(n * PARAM_COUNT);
    let mut targets = Vec::with_capacity(n);
    for row in rows {
        design.push(1.0);
        design.extend(scaler.transform_row(&row.features()));
        targets.push(row.sale_price);
    }

    let x = DMatrix::from_row_slice(n, PARAM_COUNT, &design);
    let y = DVector::from_vec(targets);

    let beta = solve_least_squares(&x, &y).ok_or_else(|| {
        AppError::internal("Least squares solve failed: design matrix too ill-conditioned.")
    })?;

    Ok(LinearModel {
        intercept: beta[0],
        weights: beta.iter().skip(1).copied().collect(),
    })
}

fn rmse(model: &LinearModel, scaler: &FeatureScaler, rows: &[&TrainingRecord]) -> f64 {
    let sse: f64 = rows
        .iter()
        .map(|r| {
            let y_fit = model.predict(&scaler.transform_row(&r.features()));
            (r.sale_price - y_fit).powi(2)
        })
        .sum();
    (sse / rows.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::{DatasetStats, TrainingData};

    /// Noiseless records following an exact linear relation.
    fn linear_records(n: usize) -> Vec<TrainingRecord> {
        (0..n)
            .map(|i| {
                let living_area = 800.0 + (i % 13) as f64 * 110.0;
                let overall_quality = 1.0 + (i % 10) as f64;
                let garage_capacity = (i % 4) as f64;
                let basement_area = 200.0 + (i % 7) as f64 * 140.0;
                let sale_price = 50_000.0
                    + 100.0 * living_area
                    + 5_000.0 * overall_quality
                    + 3_000.0 * garage_capacity
                    + 20.0 * basement_area;
                TrainingRecord {
                    living_area,
                    overall_quality,
                    garage_capacity,
                    basement_area,
                    sale_price,
                }
            })
            .collect()
    }

    fn data(records: Vec<TrainingRecord>) -> TrainingData {
        let n = records.len();
        TrainingData {
            records,
            stats: DatasetStats {
                n_rows: n,
                area_min: 0.0,
                area_max: 0.0,
                price_min: 0.0,
                price_max: 0.0,
            },
            row_errors: Vec::new(),
            rows_read: n,
            rows_used: n,
        }
    }

    fn config(holdout: f64, seed: u64) -> TrainConfig {
        TrainConfig {
            csv_path: "unused.csv".into(),
            out_dir: "unused".into(),
            holdout,
            seed,
        }
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let (train_a, holdout_a) = split_indices(50, 10, 42);
        let (train_b, holdout_b) = split_indices(50, 10, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(holdout_a, holdout_b);

        // Partition: disjoint and exhaustive.
        let mut all: Vec<usize> = train_a.iter().chain(&holdout_a).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn recovers_exact_linear_relation() {
        let out = train(&data(linear_records(60)), &config(0.2, 42)).unwrap();

        // Noiseless data: both splits should fit to numerical precision.
        assert!(out.quality.train_rmse < 1e-6, "train_rmse={}", out.quality.train_rmse);
        let holdout = out.quality.holdout_rmse.unwrap();
        assert!(holdout < 1e-6, "holdout_rmse={holdout}");
        assert_eq!(out.quality.n_train + out.quality.n_holdout, 60);
    }

    #[test]
    fn zero_holdout_skips_evaluation() {
        let out = train(&data(linear_records(30)), &config(0.0, 42)).unwrap();
        assert_eq!(out.quality.n_holdout, 0);
        assert!(out.quality.holdout_rmse.is_none());
    }

    #[test]
    fn too_few_rows_is_a_data_error() {
        let err = train(&data(linear_records(6)), &config(0.2, 42)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn training_is_reproducible() {
        let a = train(&data(linear_records(60)), &config(0.2, 7)).unwrap();
        let b = train(&data(linear_records(60)), &config(0.2, 7)).unwrap();
        assert_eq!(a.model.intercept.to_bits(), b.model.intercept.to_bits());
        assert_eq!(a.model.weights, b.model.weights);
    }
}
