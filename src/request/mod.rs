//! Online request handling.
//!
//! `Estimator` is the process-wide read-only handle: it loads the
//! model/scaler artifact pair once at startup and then prices requests
//! with no further mutable state. `handle` always renders a response
//! body: request-level failures become error text, never a process
//! error (tier-3 catch-all).

use std::path::Path;

use crate::domain::{FieldMap, LinearModel};
use crate::error::AppError;
use crate::io::artifact::load_artifacts;
use crate::math::FeatureScaler;
use crate::pricing::estimate_price;
use crate::report;
use crate::request::validate::validate;

pub mod validate;

/// Loaded model + scaler pair; immutable after construction.
pub struct Estimator {
    model: LinearModel,
    scaler: FeatureScaler,
}

impl Estimator {
    /// Load the artifact pair from `dir`. Failures here are fatal
    /// startup errors, not request errors.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let (model, scaler) = load_artifacts(dir)?;
        log::info!("estimator loaded from '{}'", dir.display());
        Ok(Self { model, scaler })
    }

    /// Build from already-loaded parts (tests, embedding).
    pub fn from_parts(model: LinearModel, scaler: FeatureScaler) -> Self {
        Self { model, scaler }
    }

    /// Price one submitted field map and render the response text.
    ///
    /// Error tiers, narrowest last:
    /// 1. missing field -> names the first missing field
    /// 2. invalid total_area/overallqual -> generic message
    /// 3. anything else during pricing -> generic message echoing the
    ///    failure, logged
    pub fn handle(&self, fields: &FieldMap) -> String {
        let request = match validate(fields) {
            Ok(request) => request,
            Err(e) => return report::format_error(&e.to_string()),
        };

        match estimate_price(&self.model, &self.scaler, &request) {
            Ok(estimate) => report::format_estimate(&estimate, &request),
            Err(e) => {
                log::error!("pricing failed: {e}");
                report::format_error(&format!("Please check your input values. Details: {e}"))
            }
        }
    }
}
