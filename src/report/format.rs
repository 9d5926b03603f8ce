//! Response and summary formatting.

use crate::domain::{TrainConfig, TrainQuality};
use crate::io::ingest::TrainingData;
use crate::pricing::{Estimate, PricingRequest};

/// Render the success response for one priced request.
///
/// Categorical values are echoed from the raw submission (title-cased),
/// so an unrecognized key still displays as entered.
pub fn format_estimate(estimate: &Estimate, request: &PricingRequest) -> String {
    let property = title_case(request.raw("property_type"));
    let locality = title_case(request.raw("area"));
    let furnishing = title_case(request.raw("furnishing"));

    format!(
        "Estimated Price for {property} in {locality}: \u{20b9}{} (\u{20b9}{} per sq ft)\n\
         Property Details: {} BHK, {} Bathrooms, Floor {}, {furnishing}, {} Parking",
        fmt_thousands(estimate.final_price.floor() as i64),
        fmt_thousands(estimate.price_per_area),
        request.raw("bedrooms"),
        request.raw("bathrooms"),
        request.raw("floor"),
        request.raw("parking"),
    )
}

/// Render an error response.
pub fn format_error(message: &str) -> String {
    format!("Error: {message}")
}

/// Format the training-run summary (dataset stats + fit diagnostics).
pub fn format_train_summary(
    data: &TrainingData,
    quality: &TrainQuality,
    config: &TrainConfig,
    model_path: &std::path::Path,
    scaler_path: &std::path::Path,
) -> String {
    let mut out = String::new();

    out.push_str("=== homeval - Price Model Training ===\n");
    out.push_str(&format!("CSV: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: read={} used={} dropped={}\n",
        data.rows_read,
        data.rows_used,
        data.rows_read - data.rows_used
    ));
    out.push_str(&format!(
        "Living area: [{:.0}, {:.0}] | Sale price: [{:.0}, {:.0}]\n",
        data.stats.area_min, data.stats.area_max, data.stats.price_min, data.stats.price_max
    ));
    out.push_str(&format!(
        "Split: train={} holdout={} (seed={})\n",
        quality.n_train, quality.n_holdout, config.seed
    ));

    out.push_str("\nFit diagnostics:\n");
    out.push_str(&format!("- train RMSE: {:.1}\n", quality.train_rmse));
    match quality.holdout_rmse {
        Some(rmse) => out.push_str(&format!("- holdout RMSE: {rmse:.1}\n")),
        None => out.push_str("- holdout RMSE: (no holdout rows)\n"),
    }

    out.push_str("\nArtifacts:\n");
    out.push_str(&format!("- {}\n", model_path.display()));
    out.push_str(&format!("- {}\n", scaler_path.display()));

    out
}

/// `snake_case` or free text -> display casing ("fully_furnished" ->
/// "Fully Furnished").
pub fn title_case(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group an integer amount with comma separators ("1234567" ->
/// "1,234,567").
pub fn fmt_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(1_000), "1,000");
        assert_eq!(fmt_thousands(1_234_567), "1,234,567");
        assert_eq!(fmt_thousands(-98_765), "-98,765");
    }

    #[test]
    fn title_casing() {
        assert_eq!(title_case("koregaon_park"), "Koregaon Park");
        assert_eq!(title_case("villa"), "Villa");
        assert_eq!(title_case("FULLY_FURNISHED"), "Fully Furnished");
        assert_eq!(title_case(""), "");
    }
}
