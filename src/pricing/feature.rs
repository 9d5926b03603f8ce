//! Composite feature multiplier.
//!
//! Five independent terms derived from the raw field map, multiplied
//! together: bedrooms, bathrooms, floor, age, parking. Parsing any of the
//! five fields can fail (the validator deliberately does not check them);
//! in that case the whole multiplier degrades to neutral rather than
//! failing the request.

use crate::domain::FieldMap;
use crate::pricing::tables::NEUTRAL_MULTIPLIER;

/// Price increase per bedroom beyond the first.
const BEDROOM_STEP: f64 = 0.15;
/// Price increase per bathroom beyond the first.
const BATHROOM_STEP: f64 = 0.10;
/// Price increase per floor, counted up to `FLOOR_CAP`.
const FLOOR_STEP: f64 = 0.02;
/// Floors above this contribute nothing extra.
const FLOOR_CAP: i64 = 10;
/// Price decrease per year of age, counted up to `AGE_CAP`.
const AGE_STEP: f64 = 0.01;
/// Years of age beyond this depreciate no further.
const AGE_CAP: i64 = 30;
/// The age term never drops the price below this fraction of base.
const AGE_FLOOR: f64 = 0.70;
/// Price increase per parking spot.
const PARKING_STEP: f64 = 0.05;

/// Compute the composite feature multiplier for a request.
///
/// Degrades to `NEUTRAL_MULTIPLIER` (with a warning log) if any of the
/// five fields fails to parse as an integer; the whole calculation is
/// abandoned, not individual terms.
pub fn feature_multiplier(fields: &FieldMap) -> f64 {
    match try_feature_multiplier(fields) {
        Some(m) => m,
        None => {
            log::warn!("feature multiplier degraded to neutral: unparseable numeric field");
            NEUTRAL_MULTIPLIER
        }
    }
}

fn try_feature_multiplier(fields: &FieldMap) -> Option<f64> {
    let bedrooms = parse_count(fields, "bedrooms")?;
    let bathrooms = parse_count(fields, "bathrooms")?;
    let floor = parse_count(fields, "floor")?;
    let age = parse_count(fields, "age")?;
    let parking = parse_count(fields, "parking")?;

    let mut multiplier = 1.0 + (bedrooms - 1) as f64 * BEDROOM_STEP;
    multiplier *= 1.0 + (bathrooms - 1) as f64 * BATHROOM_STEP;

    // Ground floor and basements contribute nothing.
    if floor > 0 {
        multiplier *= 1.0 + floor.min(FLOOR_CAP) as f64 * FLOOR_STEP;
    }

    let age_term = 1.0 - age.min(AGE_CAP) as f64 * AGE_STEP;
    multiplier *= age_term.max(AGE_FLOOR);

    multiplier *= 1.0 + parking as f64 * PARKING_STEP;

    Some(multiplier)
}

/// Single integer-parse boundary for feature fields.
///
/// Centralizes the "parse or degrade" policy so the fallback behavior is
/// testable independently of the transport.
fn parse_count(fields: &FieldMap, name: &str) -> Option<i64> {
    fields.get(name)?.trim().parse::<i64>().ok()
}
