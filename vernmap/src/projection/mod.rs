//! Coordinate reprojection between registered reference systems.
//!
//! Facility records arrive in two reference systems: shelters in
//! geographic WGS-84, bunkers in a regional projected UTM system
//! (EPSG:25832, UTM zone 32N over the ETRS89/GRS80 ellipsoid, which is
//! coincident with WGS-84 at this accuracy). This module converts
//! projected coordinates to geographic degrees once, at registry load —
//! never per query.
//!
//! # Axis order
//!
//! Geographic pairs are `(longitude, latitude)` and projected pairs are
//! `(easting, northing)`, matching the GeoJSON/proj convention used by
//! the data sources.

mod tmerc;

use thiserror::Error;

use crate::coord::{self, GeoPoint};

/// A registered coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// Geographic WGS-84 degrees (EPSG:4326).
    Wgs84,
    /// Projected UTM zone, meters. `north` selects the hemisphere.
    Utm { zone: u8, north: bool },
}

/// The projected system the bunker registry is stored in (EPSG:25832).
pub const BUNKER_SOURCE_CRS: Crs = Crs::Utm {
    zone: 32,
    north: true,
};

impl Crs {
    /// Resolve an `EPSG:<code>` identifier to a registered system.
    ///
    /// Registered: 4326 (geographic), 25828-25838 (ETRS89 UTM 28N-38N),
    /// 32601-32660 and 32701-32760 (WGS-84 UTM north/south).
    ///
    /// # Errors
    ///
    /// [`ProjectionError::UnknownCrs`] for anything else.
    pub fn from_epsg(identifier: &str) -> Result<Self, ProjectionError> {
        let code: u32 = identifier
            .strip_prefix("EPSG:")
            .and_then(|c| c.parse().ok())
            .ok_or_else(|| ProjectionError::UnknownCrs(identifier.to_string()))?;

        match code {
            4326 => Ok(Crs::Wgs84),
            25828..=25838 => Ok(Crs::Utm {
                zone: (code - 25800) as u8,
                north: true,
            }),
            32601..=32660 => Ok(Crs::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Ok(Crs::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            _ => Err(ProjectionError::UnknownCrs(identifier.to_string())),
        }
    }
}

/// Errors that can occur during reprojection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The CRS identifier does not name a registered system.
    #[error("Unknown coordinate reference system '{0}'")]
    UnknownCrs(String),

    /// No transformation is registered between the two systems.
    #[error("Unsupported transformation from {from:?} to {target:?}")]
    Unsupported { from: Crs, target: Crs },

    /// Input coordinate is not a finite two-component pair.
    #[error("Coordinate ({0}, {1}) is not finite")]
    NonFinite(f64, f64),

    /// The underlying transform rejected the coordinate.
    #[error("Transform failed: {0}")]
    Transform(String),
}

/// Reproject a coordinate pair between two registered systems.
///
/// Pure and deterministic. Geographic pairs are `(lon, lat)`, projected
/// pairs `(easting, northing)`.
///
/// # Errors
///
/// [`ProjectionError`] if the input is non-finite, either system is
/// unregistered for this pair, or the transform rejects the coordinate.
pub fn reproject(
    input: [f64; 2],
    source: &Crs,
    target: &Crs,
) -> Result<[f64; 2], ProjectionError> {
    let [a, b] = input;
    if !a.is_finite() || !b.is_finite() {
        return Err(ProjectionError::NonFinite(a, b));
    }

    match (source, target) {
        (Crs::Wgs84, Crs::Wgs84) => Ok(input),
        (Crs::Utm { zone, north }, Crs::Wgs84) => {
            let point = utm_to_geographic(a, b, *zone, *north)?;
            Ok([point.lon, point.lat])
        }
        (Crs::Wgs84, Crs::Utm { zone, north }) => {
            check_zone(*zone)?;
            let point = coord::validated(b, a)
                .map_err(|e| ProjectionError::Transform(e.to_string()))?;
            let (easting, northing) = tmerc::forward(point.lat, point.lon, *zone, *north);
            Ok([easting, northing])
        }
        (s @ Crs::Utm { .. }, t @ Crs::Utm { .. }) if s == t => Ok(input),
        (s, t) => Err(ProjectionError::Unsupported {
            from: *s,
            target: *t,
        }),
    }
}

/// Convert a projected `(easting, northing)` pair to a geographic point.
///
/// This is the registry-load path for bunker records.
pub fn utm_to_geographic(
    easting: f64,
    northing: f64,
    zone: u8,
    north: bool,
) -> Result<GeoPoint, ProjectionError> {
    check_zone(zone)?;
    if !easting.is_finite() || !northing.is_finite() {
        return Err(ProjectionError::NonFinite(easting, northing));
    }

    let (lat, lon) = tmerc::inverse(easting, northing, zone, north);

    // A coordinate far outside the zone comes back out of range; treat
    // that as a transform rejection, not a panic.
    coord::validated(lat, lon).map_err(|e| ProjectionError::Transform(e.to_string()))
}

/// Convert a geographic point to projected `(easting, northing)` in the
/// given UTM zone. The hemisphere is taken from the latitude's sign.
pub fn geographic_to_utm(point: GeoPoint, zone: u8) -> Result<(f64, f64), ProjectionError> {
    check_zone(zone)?;
    if !point.is_valid() {
        return Err(ProjectionError::NonFinite(point.lat, point.lon));
    }

    Ok(tmerc::forward(point.lat, point.lon, zone, point.lat >= 0.0))
}

fn check_zone(zone: u8) -> Result<(), ProjectionError> {
    if (1..=60).contains(&zone) {
        Ok(())
    } else {
        Err(ProjectionError::Transform(format!(
            "UTM zone {} out of range 1-60",
            zone
        )))
    }
}
