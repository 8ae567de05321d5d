//! Area analysis over drawn shapes.
//!
//! The user draws a circle, rectangle or polygon on the map; this module
//! reports the population living inside it, the bunker capacity
//! available inside it, and the resulting coverage ratio.
//!
//! Shapes are an explicit tagged union with a `contains_point` per
//! variant — the variant is decided once at construction, not re-derived
//! by inspecting the drawn layer at each use site.

use geo::algorithm::contains::Contains;
use geo::algorithm::coords_iter::CoordsIter;
use geo::algorithm::intersects::Intersects;

use crate::coord::{distance_meters, GeoPoint};
use crate::facility::FacilityPoint;
use crate::population::PopulationArea;

/// A drawn analysis shape.
///
/// Rectangle and polygon coordinates are geographic degrees
/// (`x = lon`, `y = lat`); circle radii are meters.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisShape {
    /// Circle around a center point.
    Circle { center: GeoPoint, radius_m: f64 },
    /// Axis-aligned rectangle.
    Rectangle { bounds: geo::Rect<f64> },
    /// Arbitrary polygon boundary.
    Polygon { boundary: geo::Polygon<f64> },
}

impl AnalysisShape {
    /// A circle of `radius_m` meters around `center`.
    pub fn circle(center: GeoPoint, radius_m: f64) -> Self {
        AnalysisShape::Circle { center, radius_m }
    }

    /// A rectangle spanned by two opposite corners.
    pub fn rectangle(corner_a: GeoPoint, corner_b: GeoPoint) -> Self {
        let bounds = geo::Rect::new(
            geo::coord! { x: corner_a.lon, y: corner_a.lat },
            geo::coord! { x: corner_b.lon, y: corner_b.lat },
        );
        AnalysisShape::Rectangle { bounds }
    }

    /// A polygon through the given boundary points (closed
    /// automatically).
    pub fn polygon(boundary: &[GeoPoint]) -> Self {
        let ring: Vec<(f64, f64)> = boundary.iter().map(|p| (p.lon, p.lat)).collect();
        AnalysisShape::Polygon {
            boundary: geo::Polygon::new(geo::LineString::from(ring), vec![]),
        }
    }

    /// Whether the shape contains a geographic point.
    pub fn contains_point(&self, point: GeoPoint) -> bool {
        match self {
            AnalysisShape::Circle { center, radius_m } => {
                distance_meters(*center, point) <= *radius_m
            }
            AnalysisShape::Rectangle { bounds } => {
                bounds.contains(&geo::point! { x: point.lon, y: point.lat })
            }
            AnalysisShape::Polygon { boundary } => {
                boundary.contains(&geo::point! { x: point.lon, y: point.lat })
            }
        }
    }

    /// Whether the shape touches a population area.
    ///
    /// Circles test the area's boundary vertices against the radius
    /// (plus the degenerate case of a circle entirely inside the area);
    /// rectangles and polygons use geometric intersection.
    fn touches_area(&self, area: &PopulationArea) -> bool {
        match self {
            AnalysisShape::Circle { center, radius_m } => {
                let inside_area = area
                    .geometry
                    .contains(&geo::point! { x: center.lon, y: center.lat });
                inside_area
                    || area
                        .geometry
                        .coords_iter()
                        .any(|c| distance_meters(*center, GeoPoint::new(c.y, c.x)) <= *radius_m)
            }
            AnalysisShape::Rectangle { bounds } => {
                let shape = geo::Geometry::Polygon(bounds.to_polygon());
                area.geometry.intersects(&shape)
            }
            AnalysisShape::Polygon { boundary } => {
                let shape = geo::Geometry::Polygon(boundary.clone());
                area.geometry.intersects(&shape)
            }
        }
    }
}

/// Result of analyzing a drawn shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Population of the areas the shape touches.
    pub total_population: u64,
    /// Bunker places inside the shape.
    pub shelter_capacity: u64,
    /// Capacity as a percentage of population (zero when no population).
    pub coverage_percent: f64,
}

/// Analyze a drawn shape against population areas and bunker capacity.
///
/// Shelter facilities carry no capacity and contribute nothing; only
/// bunkers with a known number of places count.
pub fn analyze(
    shape: &AnalysisShape,
    areas: &[PopulationArea],
    facilities: &[FacilityPoint],
) -> AnalysisReport {
    let total_population: u64 = areas
        .iter()
        .filter(|area| shape.touches_area(area))
        .map(|area| area.population)
        .sum();

    let shelter_capacity: u64 = facilities
        .iter()
        .filter(|f| shape.contains_point(f.position))
        .filter_map(|f| f.bunker_details().and_then(|d| d.capacity))
        .map(u64::from)
        .sum();

    let coverage_percent = if total_population > 0 {
        shelter_capacity as f64 / total_population as f64 * 100.0
    } else {
        0.0
    };

    AnalysisReport {
        total_population,
        shelter_capacity,
        coverage_percent,
    }
}
