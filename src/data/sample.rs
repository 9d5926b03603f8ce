//! Synthetic housing dataset generation.
//!
//! Rows follow a noisy linear price relation over the same columns the
//! trainer selects, so a model fit on a generated file behaves like one
//! fit on a real export. A small fraction of rows gets a blank basement
//! value to exercise the trainer's drop-incomplete-rows path.

use std::fs::File;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::SampleConfig;
use crate::error::AppError;

/// True per-sq-ft contribution of living area.
const LIVING_AREA_RATE: f64 = 100.0;
/// True contribution per quality point.
const QUALITY_RATE: f64 = 18_000.0;
/// True contribution per garage spot.
const GARAGE_RATE: f64 = 9_000.0;
/// True per-sq-ft contribution of basement area.
const BASEMENT_RATE: f64 = 25.0;
/// Price level independent of all features.
const BASE_LEVEL: f64 = 40_000.0;
/// Std dev of the price noise term.
const NOISE_SIGMA: f64 = 15_000.0;
/// Fraction of rows emitted with a blank basement value.
const BLANK_PROB: f64 = 0.02;

/// One generated row; `basement_area` is `None` for deliberately
/// incomplete rows.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub living_area: f64,
    pub overall_quality: u32,
    pub garage_capacity: u32,
    pub basement_area: Option<f64>,
    pub sale_price: f64,
}

/// Generate `config.count` rows deterministically from `config.seed`.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<SampleRow>, AppError> {
    if config.count == 0 {
        return Err(AppError::usage("Sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let living_dist = Normal::<f64>::new(1500.0, 450.0)
        .map_err(|e| AppError::internal(format!("Living-area distribution error: {e}")))?;
    let basement_dist = Normal::<f64>::new(850.0, 350.0)
        .map_err(|e| AppError::internal(format!("Basement distribution error: {e}")))?;
    let noise_dist = Normal::<f64>::new(0.0, NOISE_SIGMA)
        .map_err(|e| AppError::internal(format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let living_area = living_dist.sample(&mut rng).max(350.0).round();
        let overall_quality = rng.gen_range(1..=10u32);
        let garage_capacity = rng.gen_range(0..=3u32);
        let basement_area = basement_dist.sample(&mut rng).max(0.0).round();

        let price = BASE_LEVEL
            + LIVING_AREA_RATE * living_area
            + QUALITY_RATE * f64::from(overall_quality)
            + GARAGE_RATE * f64::from(garage_capacity)
            + BASEMENT_RATE * basement_area
            + noise_dist.sample(&mut rng);
        let sale_price = price.max(10_000.0).round();

        let basement_area = if rng.gen_bool(BLANK_PROB) {
            None
        } else {
            Some(basement_area)
        };

        rows.push(SampleRow {
            living_area,
            overall_quality,
            garage_capacity,
            basement_area,
            sale_price,
        });
    }

    Ok(rows)
}

/// Write generated rows as a training-schema CSV.
pub fn write_sample_csv(path: &Path, rows: &[SampleRow]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create sample CSV '{}': {e}", path.display()))
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record([
            "living_area",
            "overall_quality",
            "garage_capacity",
            "basement_area",
            "sale_price",
        ])
        .map_err(|e| AppError::usage(format!("Failed to write CSV header: {e}")))?;

    for row in rows {
        let basement = row
            .basement_area
            .map(|v| format!("{v}"))
            .unwrap_or_default();
        writer
            .write_record([
                format!("{}", row.living_area),
                format!("{}", row.overall_quality),
                format!("{}", row.garage_capacity),
                basement,
                format!("{}", row.sale_price),
            ])
            .map_err(|e| AppError::usage(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::load_training_csv;

    fn config(count: usize, seed: u64) -> SampleConfig {
        SampleConfig {
            out_path: "unused.csv".into(),
            count,
            seed,
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let a = generate_sample(&config(25, 42)).unwrap();
        let b = generate_sample(&config(25, 42)).unwrap();

        assert_eq!(a.len(), 25);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.living_area, y.living_area);
            assert_eq!(x.sale_price, y.sale_price);
            assert_eq!(x.basement_area, y.basement_area);
        }
    }

    #[test]
    fn generated_values_stay_in_plausible_ranges() {
        let rows = generate_sample(&config(200, 7)).unwrap();
        for row in &rows {
            assert!(row.living_area >= 350.0);
            assert!((1..=10).contains(&row.overall_quality));
            assert!(row.garage_capacity <= 3);
            assert!(row.sale_price >= 10_000.0);
        }
    }

    #[test]
    fn zero_count_is_a_usage_error() {
        assert!(generate_sample(&config(0, 1)).is_err());
    }

    #[test]
    fn written_csv_feeds_the_ingest_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        let rows = generate_sample(&config(150, 42)).unwrap();
        write_sample_csv(&path, &rows).unwrap();

        let data = load_training_csv(&path).unwrap();
        assert_eq!(data.rows_read, 150);
        assert!(data.rows_used > 0);
        assert!(data.rows_used <= data.rows_read);
        // Dropped rows are exactly the deliberately blanked ones.
        assert_eq!(
            data.rows_read - data.rows_used,
            rows.iter().filter(|r| r.basement_area.is_none()).count()
        );
    }
}
