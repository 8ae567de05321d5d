//! Facility model and registries.
//!
//! A facility is a civil-defense shelter or a public bunker. Facilities
//! are loaded once from the external data source, reprojected to
//! geographic coordinates where needed, and held immutable in an
//! in-memory registry for the lifetime of the session.

mod records;
mod registry;

pub use records::{BunkerRecord, PointGeometry, ShelterRecord};
pub use registry::FacilityRegistry;

use std::fmt;

use crate::coord::GeoPoint;

/// The two facility categories the map distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityKind {
    /// Basic emergency shelter (no structured attributes).
    Shelter,
    /// Public bunker with address, capacity and room number.
    Bunker,
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityKind::Shelter => write!(f, "shelter"),
            FacilityKind::Bunker => write!(f, "bunker"),
        }
    }
}

/// Descriptive attributes carried by bunker records.
///
/// All fields are optional: upstream rows with gaps still register, the
/// presentation layer renders blanks for missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BunkerDetails {
    /// Street address.
    pub address: Option<String>,
    /// Number of places.
    pub capacity: Option<u32>,
    /// Room number within the structure.
    pub room_number: Option<String>,
}

/// Kind-specific facility information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityInfo {
    Shelter,
    Bunker(BunkerDetails),
}

/// A single facility location.
///
/// `position` is always geographic, regardless of the record's source
/// projection — bunker coordinates are reprojected exactly once, when
/// the registry is populated. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityPoint {
    /// Geographic position.
    pub position: GeoPoint,
    /// Kind-specific attributes.
    pub info: FacilityInfo,
}

impl FacilityPoint {
    /// Create a shelter facility.
    pub fn shelter(position: GeoPoint) -> Self {
        Self {
            position,
            info: FacilityInfo::Shelter,
        }
    }

    /// Create a bunker facility.
    pub fn bunker(position: GeoPoint, details: BunkerDetails) -> Self {
        Self {
            position,
            info: FacilityInfo::Bunker(details),
        }
    }

    /// The facility's category.
    pub fn kind(&self) -> FacilityKind {
        match self.info {
            FacilityInfo::Shelter => FacilityKind::Shelter,
            FacilityInfo::Bunker(_) => FacilityKind::Bunker,
        }
    }

    /// Bunker attributes, if this is a bunker.
    pub fn bunker_details(&self) -> Option<&BunkerDetails> {
        match &self.info {
            FacilityInfo::Shelter => None,
            FacilityInfo::Bunker(details) => Some(details),
        }
    }
}
