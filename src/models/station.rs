use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::utils::coordinates::haversine_distance;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// A river gauge in the station catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationEntry {
    #[validate(length(min = 1))]
    pub code: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub coordinates: Coordinates,

    pub category: String,

    /// Lowercase, trimmed, never empty strings
    pub countries: BTreeSet<String>,
}

impl StationEntry {
    pub fn new(
        code: String,
        name: String,
        coordinates: Coordinates,
        category: String,
        countries: BTreeSet<String>,
    ) -> Self {
        Self {
            code,
            name,
            coordinates,
            category,
            countries,
        }
    }

    /// Split a `"Brasil, Peru"` style field into normalized tags
    pub fn parse_countries(raw: &str) -> BTreeSet<String> {
        raw.split(',')
            .map(|country| country.trim().to_lowercase())
            .filter(|country| !country.is_empty())
            .collect()
    }

    pub fn is_in_country(&self, country: &str) -> bool {
        self.countries.contains(&country.trim().to_lowercase())
    }
}
