//! Population-density areas.
//!
//! Regional population polygons backing the coverage analysis. Loaded
//! once from the external data store, best-effort, and read-only
//! afterwards — the same population policy as the facility registries.

use serde::Deserialize;
use tracing::{info, warn};

/// A population row as delivered by the data source.
///
/// The geometry arrives as GeoJSON (polygon or multi-polygon) in
/// geographic coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct PopulationRecord {
    #[serde(default)]
    pub geom: Option<geojson::Geometry>,
    /// Total population of the area.
    #[serde(rename = "poptot", default)]
    pub population: Option<u64>,
    /// Area display name.
    #[serde(rename = "navnerom", default)]
    pub name: Option<String>,
    /// Upstream area identifier.
    #[serde(rename = "lokalid", default)]
    pub area_id: Option<String>,
}

/// A registered population area with decoded geometry.
#[derive(Debug, Clone)]
pub struct PopulationArea {
    /// Area boundary in geographic coordinates.
    pub geometry: geo::Geometry<f64>,
    /// Total population of the area.
    pub population: u64,
    /// Area display name.
    pub name: Option<String>,
    /// Upstream area identifier.
    pub area_id: Option<String>,
}

/// Read-only collection of population areas.
#[derive(Debug, Clone, Default)]
pub struct PopulationRegistry {
    areas: Vec<PopulationArea>,
}

impl PopulationRegistry {
    /// Build the registry from source rows.
    ///
    /// Rows without decodable geometry are skipped with a warning; a
    /// missing population counts as zero, matching how the source data
    /// renders such areas.
    pub fn from_records(records: &[PopulationRecord]) -> Self {
        let mut areas = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, record) in records.iter().enumerate() {
            let Some(geom) = &record.geom else {
                warn!(index, "Skipping population row without geometry");
                skipped += 1;
                continue;
            };
            match geo::Geometry::<f64>::try_from(geom.value.clone()) {
                Ok(geometry) => areas.push(PopulationArea {
                    geometry,
                    population: record.population.unwrap_or(0),
                    name: record.name.clone(),
                    area_id: record.area_id.clone(),
                }),
                Err(e) => {
                    warn!(index, error = %e, "Skipping population row with undecodable geometry");
                    skipped += 1;
                }
            }
        }

        info!(
            loaded = areas.len(),
            skipped, "Population registry populated"
        );
        Self { areas }
    }

    /// Number of registered areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// True if no area survived population.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// The registered areas, in source order.
    pub fn as_slice(&self) -> &[PopulationArea] {
        &self.areas
    }

    /// Iterate over the registered areas.
    pub fn iter(&self) -> impl Iterator<Item = &PopulationArea> {
        self.areas.iter()
    }

    /// Sum of the registered populations.
    pub fn total_population(&self) -> u64 {
        self.areas.iter().map(|a| a.population).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon_record(population: u64) -> PopulationRecord {
        let json = format!(
            r#"{{
                "geom": {{
                    "type": "Polygon",
                    "coordinates": [[[8.00, 58.16], [8.02, 58.16], [8.02, 58.18], [8.00, 58.18], [8.00, 58.16]]]
                }},
                "poptot": {population},
                "navnerom": "Kvadraturen",
                "lokalid": "area-1"
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_registry_decodes_polygon_rows() {
        let registry = PopulationRegistry::from_records(&[polygon_record(1200)]);

        assert_eq!(registry.len(), 1);
        let area = &registry.as_slice()[0];
        assert_eq!(area.population, 1200);
        assert_eq!(area.name.as_deref(), Some("Kvadraturen"));
        assert!(matches!(area.geometry, geo::Geometry::Polygon(_)));
    }

    #[test]
    fn test_registry_skips_rows_without_geometry() {
        let missing: PopulationRecord = serde_json::from_str(r#"{"poptot": 900}"#).unwrap();
        let registry = PopulationRegistry::from_records(&[missing, polygon_record(1200)]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.total_population(), 1200);
    }

    #[test]
    fn test_missing_population_counts_as_zero() {
        let json = r#"{
            "geom": {
                "type": "Polygon",
                "coordinates": [[[8.0, 58.0], [8.1, 58.0], [8.1, 58.1], [8.0, 58.0]]]
            }
        }"#;
        let record: PopulationRecord = serde_json::from_str(json).unwrap();
        let registry = PopulationRegistry::from_records(&[record]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.total_population(), 0);
    }
}
