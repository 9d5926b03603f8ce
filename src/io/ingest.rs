//! Training CSV ingest and normalization.
//!
//! This module turns a heterogeneous housing CSV into clean
//! `TrainingRecord`s that are safe to fit.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level lenience**: a row missing any selected value is dropped
//!   and counted, never fatal
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::TrainingRecord;
use crate::error::AppError;

/// Accepted header spellings per selected column, Kaggle-style first.
const LIVING_AREA_COLS: [&str; 2] = ["grlivarea", "living_area"];
const OVERALL_QUALITY_COLS: [&str; 2] = ["overallqual", "overall_quality"];
const GARAGE_CAPACITY_COLS: [&str; 2] = ["garagecars", "garage_capacity"];
const BASEMENT_AREA_COLS: [&str; 2] = ["totalbsmtsf", "basement_area"];
const SALE_PRICE_COLS: [&str; 2] = ["saleprice", "sale_price"];

/// Summary stats about the rows actually used for fitting.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub area_min: f64,
    pub area_max: f64,
    pub price_min: f64,
    pub price_max: f64,
}

/// A row-level problem encountered during ingest (the row was dropped).
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: clean records + stats + dropped-row diagnostics.
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub records: Vec<TrainingRecord>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and normalize a training CSV.
///
/// Rows with a missing or unparseable value in any selected column are
/// discarded (and reported); no outlier rejection or range checks are
/// applied beyond that.
pub fn load_training_csv(path: &Path) -> Result<TrainingData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);

    let living_area = resolve_column(&header_map, &LIVING_AREA_COLS)?;
    let overall_quality = resolve_column(&header_map, &OVERALL_QUALITY_COLS)?;
    let garage_capacity = resolve_column(&header_map, &GARAGE_CAPACITY_COLS)?;
    let basement_area = resolve_column(&header_map, &BASEMENT_AREA_COLS)?;
    let sale_price = resolve_column(&header_map, &SALE_PRICE_COLS)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(
            &record,
            living_area,
            overall_quality,
            garage_capacity,
            basement_area,
            sale_price,
        ) {
            Ok(rec) => records.push(rec),
            Err(e) => row_errors.push(RowError { line, message: e }),
        }
    }

    let rows_used = records.len();
    let stats = compute_stats(&records).ok_or_else(|| {
        AppError::data("No usable rows remain after dropping incomplete ones.")
    })?;

    Ok(TrainingData {
        records,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation will
    // incorrectly report a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Result<usize, AppError> {
    for alias in aliases {
        if let Some(&idx) = header_map.get(*alias) {
            return Ok(idx);
        }
    }
    Err(AppError::usage(format!(
        "Missing required column: `{}` (alias `{}`).",
        aliases[0],
        aliases[aliases.len() - 1]
    )))
}

fn parse_row(
    record: &StringRecord,
    living_area: usize,
    overall_quality: usize,
    garage_capacity: usize,
    basement_area: usize,
    sale_price: usize,
) -> Result<TrainingRecord, String> {
    Ok(TrainingRecord {
        living_area: parse_value(record, living_area, "living area")?,
        overall_quality: parse_value(record, overall_quality, "overall quality")?,
        garage_capacity: parse_value(record, garage_capacity, "garage capacity")?,
        basement_area: parse_value(record, basement_area, "basement area")?,
        sale_price: parse_value(record, sale_price, "sale price")?,
    })
}

fn parse_value(record: &StringRecord, idx: usize, label: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing {label} value."))?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid {label} value '{raw}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite {label} value."))
    }
}

fn compute_stats(records: &[TrainingRecord]) -> Option<DatasetStats> {
    let mut area_min = f64::INFINITY;
    let mut area_max = f64::NEG_INFINITY;
    let mut price_min = f64::INFINITY;
    let mut price_max = f64::NEG_INFINITY;

    for r in records {
        area_min = area_min.min(r.living_area);
        area_max = area_max.max(r.living_area);
        price_min = price_min.min(r.sale_price);
        price_max = price_max.max(r.sale_price);
    }

    if !area_min.is_finite() || !area_max.is_finite() || !price_min.is_finite() || !price_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_rows: records.len(),
        area_min,
        area_max,
        price_min,
        price_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_kaggle_style_headers() {
        let file = write_csv(
            "GrLivArea,OverallQual,GarageCars,TotalBsmtSF,SalePrice\n\
             1500,7,2,800,250000\n\
             900,5,1,0,120000\n",
        );

        let data = load_training_csv(file.path()).unwrap();
        assert_eq!(data.rows_used, 2);
        assert_eq!(data.records[0].living_area, 1500.0);
        assert_eq!(data.records[1].sale_price, 120000.0);
    }

    #[test]
    fn loads_snake_case_headers() {
        let file = write_csv(
            "living_area,overall_quality,garage_capacity,basement_area,sale_price\n\
             1200,6,1,500,180000\n",
        );

        let data = load_training_csv(file.path()).unwrap();
        assert_eq!(data.rows_used, 1);
        assert_eq!(data.records[0].basement_area, 500.0);
    }

    #[test]
    fn drops_rows_with_missing_values() {
        let file = write_csv(
            "GrLivArea,OverallQual,GarageCars,TotalBsmtSF,SalePrice\n\
             1500,7,2,800,250000\n\
             1400,6,,700,200000\n\
             1300,bad,1,600,190000\n",
        );

        let data = load_training_csv(file.path()).unwrap();
        assert_eq!(data.rows_read, 3);
        assert_eq!(data.rows_used, 1);
        assert_eq!(data.row_errors.len(), 2);
    }

    #[test]
    fn missing_column_is_a_usage_error() {
        let file = write_csv("GrLivArea,OverallQual,GarageCars,TotalBsmtSF\n1500,7,2,800\n");

        let err = load_training_csv(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn all_rows_dropped_is_a_data_error() {
        let file = write_csv("GrLivArea,OverallQual,GarageCars,TotalBsmtSF,SalePrice\n,,,,\n");

        let err = load_training_csv(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
