//! Mathematical utilities: least squares and feature scaling.

pub mod ols;
pub mod scale;

pub use ols::*;
pub use scale::*;
