//! Dataset sources.
//!
//! Training normally runs against an externally supplied housing CSV;
//! `sample` generates a deterministic synthetic one in the same schema
//! for demos and tests.

pub mod sample;

pub use sample::*;
