//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main"
//! that:
//! - parses CLI arguments
//! - runs the offline training pipeline
//! - prices single requests against the persisted artifacts
//! - generates synthetic datasets

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Cli, Command, EstimateArgs, SampleArgs, TrainArgs};
use crate::domain::{FieldMap, SampleConfig, TrainConfig};
use crate::error::AppError;
use crate::request::Estimator;

/// Entry point for the `homeval` binary.
pub fn run() -> Result<(), AppError> {
    let _ = env_logger::try_init();
    let cli = Cli::parse();

    match cli.command {
        Command::Train(args) => handle_train(args),
        Command::Estimate(args) => handle_estimate(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let config = TrainConfig {
        csv_path: args.csv,
        out_dir: args.out,
        holdout: args.holdout,
        seed: args.seed,
    };

    let data = crate::io::ingest::load_training_csv(&config.csv_path)?;
    for err in &data.row_errors {
        log::debug!("dropped row {}: {}", err.line, err.message);
    }

    let output = crate::fit::train(&data, &config)?;
    let (model_path, scaler_path) = crate::io::artifact::write_artifacts(
        &config.out_dir,
        &output.model,
        &output.scaler,
        &output.quality,
    )?;

    println!(
        "{}",
        crate::report::format_train_summary(&data, &output.quality, &config, &model_path, &scaler_path)
    );
    Ok(())
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let fields = parse_field_pairs(&args.fields)?;
    let estimator = Estimator::load(&resolve_model_dir(args.model_dir))?;

    println!("{}", estimator.handle(&fields));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        out_path: args.out,
        count: args.count,
        seed: args.seed,
    };

    let rows = crate::data::generate_sample(&config)?;
    crate::data::write_sample_csv(&config.out_path, &rows)?;

    println!(
        "Wrote {} rows to '{}' (seed={}).",
        rows.len(),
        config.out_path.display(),
        config.seed
    );
    Ok(())
}

/// Resolve the artifact directory: CLI flag, then environment/.env, then
/// the default.
fn resolve_model_dir(cli_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir;
    }
    dotenvy::dotenv().ok();
    std::env::var("HOMEVAL_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("artifacts"))
}

/// Parse `name=value` CLI tokens into the request field map.
///
/// Values keep their raw spelling (including inner `=`); only the field
/// name is trimmed.
pub fn parse_field_pairs(pairs: &[String]) -> Result<FieldMap, AppError> {
    let mut fields = FieldMap::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(AppError::usage(format!(
                "Invalid field '{pair}': expected name=value."
            )));
        };
        fields.insert(name.trim().to_string(), value.to_string());
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_pairs_parse_into_a_map() {
        let pairs = vec!["area=baner".to_string(), "bedrooms=3".to_string()];
        let fields = parse_field_pairs(&pairs).unwrap();
        assert_eq!(fields["area"], "baner");
        assert_eq!(fields["bedrooms"], "3");
    }

    #[test]
    fn value_keeps_inner_equals_sign() {
        let pairs = vec!["note=a=b".to_string()];
        let fields = parse_field_pairs(&pairs).unwrap();
        assert_eq!(fields["note"], "a=b");
    }

    #[test]
    fn token_without_equals_is_a_usage_error() {
        let err = parse_field_pairs(&["baner".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
