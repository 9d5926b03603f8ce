//! Categorical multiplier tables.
//!
//! Each categorical request field maps to an enumerated key with a fixed
//! positive factor. Lookups are total: an unrecognized key falls back to
//! `NEUTRAL_MULTIPLIER` instead of erroring, so a typo in a categorical
//! field silently prices as the base case.

use serde::{Deserialize, Serialize};

/// Factor applied when a categorical key is not recognized.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Pune localities with 2024 market-rate factors over the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locality {
    KoregaonPark,
    KalyaniNagar,
    VimanNagar,
    Baner,
    Wakad,
    Hinjewadi,
    Kharadi,
    Aundh,
    Pashan,
    Magarpatta,
}

impl Locality {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "koregaon_park" => Some(Locality::KoregaonPark),
            "kalyani_nagar" => Some(Locality::KalyaniNagar),
            "viman_nagar" => Some(Locality::VimanNagar),
            "baner" => Some(Locality::Baner),
            "wakad" => Some(Locality::Wakad),
            "hinjewadi" => Some(Locality::Hinjewadi),
            "kharadi" => Some(Locality::Kharadi),
            "aundh" => Some(Locality::Aundh),
            "pashan" => Some(Locality::Pashan),
            "magarpatta" => Some(Locality::Magarpatta),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Locality::KoregaonPark => 4.5,
            Locality::KalyaniNagar => 4.0,
            Locality::VimanNagar => 3.8,
            Locality::Baner => 3.5,
            Locality::Wakad => 3.0,
            Locality::Hinjewadi => 2.8,
            Locality::Kharadi => 3.2,
            Locality::Aundh => 3.3,
            Locality::Pashan => 2.9,
            Locality::Magarpatta => 3.6,
        }
    }
}

/// Property types priced relative to an apartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    Villa,
    Plot,
    Penthouse,
    RowHouse,
}

impl PropertyType {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "apartment" => Some(PropertyType::Apartment),
            "villa" => Some(PropertyType::Villa),
            "plot" => Some(PropertyType::Plot),
            "penthouse" => Some(PropertyType::Penthouse),
            "row_house" => Some(PropertyType::RowHouse),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            PropertyType::Apartment => 1.0,
            PropertyType::Villa => 1.8,
            PropertyType::Plot => 1.5,
            PropertyType::Penthouse => 2.0,
            PropertyType::RowHouse => 1.2,
        }
    }
}

/// Furnishing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Furnishing {
    Unfurnished,
    SemiFurnished,
    FullyFurnished,
}

impl Furnishing {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "unfurnished" => Some(Furnishing::Unfurnished),
            "semi_furnished" => Some(Furnishing::SemiFurnished),
            "fully_furnished" => Some(Furnishing::FullyFurnished),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Furnishing::Unfurnished => 1.0,
            Furnishing::SemiFurnished => 1.1,
            Furnishing::FullyFurnished => 1.25,
        }
    }
}

/// Locality factor for a raw key, neutral when unrecognized.
pub fn locality_multiplier(key: &str) -> f64 {
    Locality::from_key(key)
        .map(Locality::multiplier)
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

/// Property-type factor for a raw key, neutral when unrecognized.
pub fn property_type_multiplier(key: &str) -> f64 {
    PropertyType::from_key(key)
        .map(PropertyType::multiplier)
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

/// Furnishing factor for a raw key, neutral when unrecognized.
pub fn furnishing_multiplier(key: &str) -> f64 {
    Furnishing::from_key(key)
        .map(Furnishing::multiplier)
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_map_to_table_factors() {
        assert!((locality_multiplier("baner") - 3.5).abs() < 1e-12);
        assert!((locality_multiplier("koregaon_park") - 4.5).abs() < 1e-12);
        assert!((property_type_multiplier("villa") - 1.8).abs() < 1e-12);
        assert!((property_type_multiplier("apartment") - 1.0).abs() < 1e-12);
        assert!((furnishing_multiplier("fully_furnished") - 1.25).abs() < 1e-12);
    }

    #[test]
    fn keys_are_case_insensitive_and_trimmed() {
        assert!((locality_multiplier(" Baner ") - 3.5).abs() < 1e-12);
        assert!((property_type_multiplier("VILLA") - 1.8).abs() < 1e-12);
    }

    #[test]
    fn unknown_keys_fall_back_to_neutral() {
        assert!((locality_multiplier("atlantis") - NEUTRAL_MULTIPLIER).abs() < 1e-12);
        assert!((property_type_multiplier("castle") - NEUTRAL_MULTIPLIER).abs() < 1e-12);
        assert!((furnishing_multiplier("") - NEUTRAL_MULTIPLIER).abs() < 1e-12);
    }
}
