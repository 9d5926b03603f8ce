//! Request validation.
//!
//! Presence is checked for all ten fields in a fixed canonical order, so
//! the error always names the *first* missing field. Only the two fields
//! that feed the model directly are range-checked here; the feature
//! fields are parsed leniently downstream (see `pricing::feature`).

use crate::domain::FieldMap;
use crate::pricing::PricingRequest;

/// Required request fields, in the order presence is reported.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "property_type",
    "area",
    "total_area",
    "bedrooms",
    "bathrooms",
    "floor",
    "age",
    "furnishing",
    "parking",
    "overallqual",
];

/// A request rejected before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// A required field is absent or empty.
    MissingField(&'static str),
    /// `total_area` / `overallqual` failed to parse or failed their
    /// range checks.
    InvalidNumbers,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::MissingField(field) => {
                write!(f, "Please fill in all required fields. Missing: {field}")
            }
            RequestError::InvalidNumbers => {
                write!(f, "Please enter valid numbers for area and quality")
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Validate a submitted field map into a `PricingRequest`.
pub fn validate(fields: &FieldMap) -> Result<PricingRequest, RequestError> {
    for field in REQUIRED_FIELDS {
        let present = fields.get(field).is_some_and(|v| !v.is_empty());
        if !present {
            return Err(RequestError::MissingField(field));
        }
    }

    let total_area = parse_primary(fields, "total_area")?;
    let overall_quality = parse_primary(fields, "overallqual")?;

    if total_area <= 0.0 || overall_quality < 1.0 || overall_quality > 10.0 {
        return Err(RequestError::InvalidNumbers);
    }

    Ok(PricingRequest {
        total_area,
        overall_quality,
        fields: fields.clone(),
    })
}

fn parse_primary(fields: &FieldMap, name: &str) -> Result<f64, RequestError> {
    // Presence was checked above; a vanished key still maps to the same
    // user-facing error rather than a panic.
    fields
        .get(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .ok_or(RequestError::InvalidNumbers)
}
