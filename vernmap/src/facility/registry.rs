//! In-memory facility registry.
//!
//! Populated once from source rows, read-only afterwards. Population is
//! best-effort: a record with a malformed or unprojectable coordinate is
//! skipped with a warning and never aborts the load.

use tracing::{info, warn};

use crate::coord;
use crate::projection::{self, BUNKER_SOURCE_CRS, Crs};

use super::records::{BunkerRecord, ShelterRecord};
use super::{BunkerDetails, FacilityKind, FacilityPoint};

/// A read-only collection of facilities of one kind.
#[derive(Debug, Clone)]
pub struct FacilityRegistry {
    kind: FacilityKind,
    facilities: Vec<FacilityPoint>,
}

impl FacilityRegistry {
    /// Create an empty registry of the given kind.
    pub fn empty(kind: FacilityKind) -> Self {
        Self {
            kind,
            facilities: Vec::new(),
        }
    }

    /// Create a registry from already-materialized facilities.
    ///
    /// The data source is opaque to the core; callers that obtain
    /// facilities some other way (fixtures, alternate stores) register
    /// them here. Order is preserved.
    pub fn from_points(kind: FacilityKind, facilities: Vec<FacilityPoint>) -> Self {
        Self { kind, facilities }
    }

    /// Build the shelter registry from source rows.
    ///
    /// Shelter geometry is already geographic `(lon, lat)`; rows without
    /// a valid coordinate are skipped.
    pub fn from_shelter_records(records: &[ShelterRecord]) -> Self {
        let mut facilities = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, record) in records.iter().enumerate() {
            let Some(pair) = record.geom.as_ref().and_then(|g| g.pair()) else {
                warn!(index, "Skipping shelter row without a point geometry");
                skipped += 1;
                continue;
            };
            let [lon, lat] = pair;
            match coord::validated(lat, lon) {
                Ok(position) => facilities.push(FacilityPoint::shelter(position)),
                Err(e) => {
                    warn!(index, error = %e, "Skipping shelter row with invalid coordinate");
                    skipped += 1;
                }
            }
        }

        info!(
            loaded = facilities.len(),
            skipped, "Shelter registry populated"
        );
        Self {
            kind: FacilityKind::Shelter,
            facilities,
        }
    }

    /// Build the bunker registry from source rows.
    ///
    /// Bunker geometry is projected `(easting, northing)` in
    /// [`BUNKER_SOURCE_CRS`]; each row is reprojected to geographic
    /// degrees here, once, so queries never touch the projection again.
    pub fn from_bunker_records(records: &[BunkerRecord]) -> Self {
        Self::from_bunker_records_in(records, &BUNKER_SOURCE_CRS)
    }

    /// Build the bunker registry from rows stored in an explicit CRS.
    pub fn from_bunker_records_in(records: &[BunkerRecord], source_crs: &Crs) -> Self {
        let mut facilities = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, record) in records.iter().enumerate() {
            let Some(pair) = record.geom.as_ref().and_then(|g| g.pair()) else {
                warn!(index, "Skipping bunker row without a point geometry");
                skipped += 1;
                continue;
            };
            let [lon, lat] = match projection::reproject(pair, source_crs, &Crs::Wgs84) {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(index, error = %e, "Skipping bunker row that failed reprojection");
                    skipped += 1;
                    continue;
                }
            };
            match coord::validated(lat, lon) {
                Ok(position) => {
                    let details = BunkerDetails {
                        address: record.address.clone(),
                        capacity: record.capacity,
                        room_number: record.room_number.clone(),
                    };
                    facilities.push(FacilityPoint::bunker(position, details));
                }
                Err(e) => {
                    warn!(index, error = %e, "Skipping bunker row with invalid coordinate");
                    skipped += 1;
                }
            }
        }

        info!(
            loaded = facilities.len(),
            skipped, "Bunker registry populated"
        );
        Self {
            kind: FacilityKind::Bunker,
            facilities,
        }
    }

    /// The kind of facility this registry holds.
    pub fn kind(&self) -> FacilityKind {
        self.kind
    }

    /// Number of registered facilities.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// True if no facility survived population.
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// The registered facilities, in source order.
    pub fn as_slice(&self) -> &[FacilityPoint] {
        &self.facilities
    }

    /// Iterate over the registered facilities in source order.
    pub fn iter(&self) -> impl Iterator<Item = &FacilityPoint> {
        self.facilities.iter()
    }
}
