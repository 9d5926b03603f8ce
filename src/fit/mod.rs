//! Offline training orchestration.
//!
//! Responsibilities:
//!
//! - deterministic train/holdout split
//! - scaler fit on the training split only
//! - OLS fit on scaled features
//! - RMSE diagnostics for both splits

pub mod trainer;

pub use trainer::*;
