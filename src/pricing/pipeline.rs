//! Per-request pricing pipeline.
//!
//! Fixed step order (all steps after the model are products, so the order
//! is commutative, but it is pinned for reproducibility):
//!
//! 1. feature vector -> scaler -> model -> base prediction
//! 2. global market adjustment
//! 3. property type, locality, furnishing table lookups
//! 4. composite feature multiplier
//! 5. per-area-unit price

use crate::domain::{FieldMap, LinearModel};
use crate::error::AppError;
use crate::math::FeatureScaler;
use crate::pricing::feature::feature_multiplier;
use crate::pricing::tables::{
    furnishing_multiplier, locality_multiplier, property_type_multiplier, Furnishing, Locality,
    PropertyType,
};

/// Uniform market-correction factor applied to every base prediction.
pub const BASE_PRICE_ADJUSTMENT: f64 = 2.5;

/// Placeholder for the garage-capacity feature the form does not collect.
const GARAGE_PLACEHOLDER: f64 = 1.0;
/// Placeholder for the basement-area feature the form does not collect.
const BASEMENT_PLACEHOLDER: f64 = 0.0;

/// A validated request as consumed by the pricing pipeline.
///
/// `total_area` and `overall_quality` have already passed the validator's
/// range checks; everything else stays in the raw field map and is parsed
/// leniently downstream.
#[derive(Debug, Clone)]
pub struct PricingRequest {
    pub total_area: f64,
    pub overall_quality: f64,
    pub fields: FieldMap,
}

impl PricingRequest {
    /// Raw string value of a field, empty if absent.
    pub fn raw(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Computed price estimate plus the inputs echoed for display.
#[derive(Debug, Clone)]
pub struct Estimate {
    /// Raw regression output before any multiplier.
    pub base_prediction: f64,
    pub final_price: f64,
    /// floor(final_price / total_area).
    pub price_per_area: i64,
    /// Recognized categorical keys (`None` means the neutral fallback
    /// applied).
    pub locality: Option<Locality>,
    pub property_type: Option<PropertyType>,
    pub furnishing: Option<Furnishing>,
    pub feature_multiplier: f64,
}

/// Run the full pricing chain for one request.
pub fn estimate_price(
    model: &LinearModel,
    scaler: &FeatureScaler,
    request: &PricingRequest,
) -> Result<Estimate, AppError> {
    let features = [
        request.total_area,
        request.overall_quality,
        GARAGE_PLACEHOLDER,
        BASEMENT_PLACEHOLDER,
    ];
    let scaled = scaler.transform_row(&features);
    let base_prediction = model.predict(&scaled);
    if !base_prediction.is_finite() {
        return Err(AppError::internal("Non-finite model prediction."));
    }

    let property_type_key = request.raw("property_type");
    let locality_key = request.raw("area");
    let furnishing_key = request.raw("furnishing");

    let mut price = base_prediction * BASE_PRICE_ADJUSTMENT;
    price *= property_type_multiplier(property_type_key);
    price *= locality_multiplier(locality_key);
    price *= furnishing_multiplier(furnishing_key);

    let feature_mult = feature_multiplier(&request.fields);
    price *= feature_mult;

    if !price.is_finite() {
        return Err(AppError::internal("Non-finite price after adjustments."));
    }

    let price_per_area = (price / request.total_area).floor() as i64;

    Ok(Estimate {
        base_prediction,
        final_price: price,
        price_per_area,
        locality: Locality::from_key(locality_key),
        property_type: PropertyType::from_key(property_type_key),
        furnishing: Furnishing::from_key(furnishing_key),
        feature_multiplier: feature_mult,
    })
}
