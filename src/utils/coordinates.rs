use crate::error::{ProcessingError, Result};
use crate::utils::decimal::normalize_decimal;

/// Parse a catalog coordinate written with either a dot or a comma decimal separator
///
/// Unlike gauge readings, a coordinate that cannot be parsed is an error: a
/// station without a position cannot be placed in the catalog.
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    normalize_decimal(coord_str).ok_or_else(|| {
        ProcessingError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })
}

/// Calculate the distance between two points using the Haversine formula
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
