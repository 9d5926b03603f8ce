//! Command-line parsing for the house price estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/pricing code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "homeval",
    version,
    about = "House price estimation: offline regression training + multiplier-chain pricing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the regression + scaler from a housing CSV and write the
    /// artifact pair.
    Train(TrainArgs),
    /// Price a property from submitted form fields.
    Estimate(EstimateArgs),
    /// Generate a synthetic housing CSV in the training schema.
    Sample(SampleArgs),
}

/// Options for the offline training run.
#[derive(Debug, Parser, Clone)]
pub struct TrainArgs {
    /// Training CSV (Kaggle-style or snake_case headers accepted).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Output directory for model.json / scaler.json.
    #[arg(long, default_value = "artifacts")]
    pub out: PathBuf,

    /// Fraction of rows held out for evaluation (never used for fitting).
    #[arg(long, default_value_t = 0.2)]
    pub holdout: f64,

    /// Random seed for the deterministic split shuffle.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for pricing one request.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Directory containing the artifact pair. Falls back to
    /// HOMEVAL_MODEL_DIR (environment or .env), then `artifacts`.
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Submitted fields as `name=value` pairs
    /// (e.g. `property_type=villa area=baner total_area=1000`).
    #[arg(value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,
}

/// Options for synthetic dataset generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of rows to generate.
    #[arg(long, default_value_t = 500)]
    pub count: usize,

    /// Random seed for generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
