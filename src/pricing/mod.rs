//! Price estimation: multiplier tables and the per-request pipeline.
//!
//! Responsibilities:
//!
//! - enumerated categorical multiplier tables with a neutral default
//! - the composite feature multiplier (bedrooms, bathrooms, floor, age,
//!   parking)
//! - the pipeline chaining scaler -> model -> multiplicative adjustments

pub mod feature;
pub mod pipeline;
pub mod tables;

pub use feature::*;
pub use pipeline::*;
pub use tables::*;
