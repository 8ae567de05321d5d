//! Raw facility rows as delivered by the data source.
//!
//! These are our own types, decoupled from any particular backing store.
//! Field names map onto the upstream table columns; only the fields the
//! core consumes are deserialized, everything else is ignored.

use serde::Deserialize;

/// Point geometry as stored in the source rows.
///
/// The coordinate pair is interpreted in the table's source CRS:
/// `(lon, lat)` for shelters, `(easting, northing)` for bunkers.
#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type", default)]
    pub geometry_type: Option<String>,
    pub coordinates: Vec<f64>,
}

impl PointGeometry {
    /// The coordinate pair, if the geometry carries exactly two
    /// finite components.
    pub fn pair(&self) -> Option<[f64; 2]> {
        match self.coordinates.as_slice() {
            [a, b] if a.is_finite() && b.is_finite() => Some([*a, *b]),
            _ => None,
        }
    }
}

/// A shelter row. Only the geometry is required; shelters carry no
/// structured attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct ShelterRecord {
    #[serde(default)]
    pub geom: Option<PointGeometry>,
}

/// A public bunker row. The geometry is projected (EPSG:25832).
#[derive(Debug, Clone, Deserialize)]
pub struct BunkerRecord {
    #[serde(default)]
    pub geom: Option<PointGeometry>,
    /// Street address.
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    /// Number of places.
    #[serde(rename = "plasser", default)]
    pub capacity: Option<u32>,
    /// Room number.
    #[serde(rename = "romnr", default)]
    pub room_number: Option<String>,
}
