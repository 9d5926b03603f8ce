//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the training-side records and run configurations
//! - the fitted linear model (serializable inference parameters only)
//! - the stringly typed request field map

pub mod types;

pub use types::*;
