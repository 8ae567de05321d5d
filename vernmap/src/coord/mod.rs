//! Geographic coordinate module
//!
//! Provides the geographic point type used throughout the library and
//! great-circle distance math on the WGS-84 sphere approximation.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: meters

mod types;

pub use types::{CoordError, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::f64::consts::PI;

/// Earth's mean radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula for accuracy over short distances.
///
/// # Arguments
///
/// * `from` - First position in geographic degrees
/// * `to` - Second position in geographic degrees
///
/// # Returns
///
/// Distance in meters.
///
/// # Example
///
/// ```
/// use vernmap::coord::{distance_meters, GeoPoint};
///
/// // One degree of latitude is roughly 111 km
/// let d = distance_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
/// assert!((d - 111_195.0).abs() < 500.0);
/// ```
pub fn distance_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat * DEG_TO_RAD;
    let lat2_rad = to.lat * DEG_TO_RAD;
    let delta_lat = (to.lat - from.lat) * DEG_TO_RAD;
    let delta_lon = (to.lon - from.lon) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Validate a raw latitude/longitude pair and build a [`GeoPoint`].
///
/// # Errors
///
/// Returns [`CoordError`] if either component is non-finite or outside
/// the geographic range.
#[inline]
pub fn validated(lat: f64, lon: f64) -> Result<GeoPoint, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    Ok(GeoPoint::new(lat, lon))
}
