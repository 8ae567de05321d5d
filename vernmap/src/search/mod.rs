//! Nearest-facility search.
//!
//! A linear scan over a facility registry with geodesic distances. The
//! registries hold at most a few hundred points, so no spatial index is
//! warranted; iteration order is the registry's source order, which makes
//! the tie-break deterministic.

use tracing::warn;

use crate::coord::{self, CoordError, GeoPoint};
use crate::facility::FacilityPoint;

/// Uniform search radius applied when callers do not override it.
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 50_000.0;

/// Outcome of a nearest-facility search.
///
/// When no facility lies within the radius, `facility` is `None` and
/// `distance_m` holds the radius bound as a sentinel — absence of the
/// facility, not the distance value, is the authoritative "not found"
/// signal.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestResult {
    /// The matched facility, if any lies within the search radius.
    pub facility: Option<FacilityPoint>,
    /// Geodesic distance in meters to the match, or the radius bound
    /// when nothing matched.
    pub distance_m: f64,
}

impl NearestResult {
    /// Whether a facility was matched.
    pub fn found(&self) -> bool {
        self.facility.is_some()
    }

    /// A "not found" result carrying the radius bound as its sentinel
    /// distance.
    pub fn absent(max_radius_m: f64) -> Self {
        Self {
            facility: None,
            distance_m: max_radius_m,
        }
    }
}

/// Find the facility closest to `query` within `max_radius_m`.
///
/// Scans every facility, computing the geodesic distance; the first
/// facility encountered with the minimum distance wins. A facility with
/// a malformed stored coordinate is excluded from the scan and logged.
/// Inputs are never mutated.
///
/// # Errors
///
/// [`CoordError`] if the query position itself is malformed — the only
/// failure mode.
pub fn find_nearest(
    query: GeoPoint,
    facilities: &[FacilityPoint],
    max_radius_m: f64,
) -> Result<NearestResult, CoordError> {
    let query = coord::validated(query.lat, query.lon)?;

    let mut best: Option<(usize, f64)> = None;
    for (index, facility) in facilities.iter().enumerate() {
        if !facility.position.is_valid() {
            warn!(
                index,
                kind = %facility.kind(),
                "Excluding facility with malformed coordinate from search"
            );
            continue;
        }
        let distance = coord::distance_meters(query, facility.position);
        // Strict comparison keeps the earliest facility on ties.
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }

    match best {
        Some((index, distance)) if distance <= max_radius_m => Ok(NearestResult {
            facility: Some(facilities[index].clone()),
            distance_m: distance,
        }),
        _ => Ok(NearestResult::absent(max_radius_m)),
    }
}
