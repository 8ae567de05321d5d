//! Integration tests for the lookup pipeline.
//!
//! These tests verify the complete flows:
//! - Source rows → registries (validation, bunker reprojection at load)
//! - Query position → nearest shelter/bunker → concurrent route resolution
//! - Display state per query source (clear-by-kind, cross-source isolation)
//! - Containment of routing failures
//!
//! Run with: `cargo test --test lookup_integration`

use std::io::Write;
use std::sync::{Arc, Mutex};

use vernmap::coord::{distance_meters, GeoPoint};
use vernmap::facility::{BunkerRecord, FacilityRegistry, ShelterRecord};
use vernmap::lookup::{LookupResult, LookupService, PresentationSink, QuerySource};
use vernmap::projection::geographic_to_utm;
use vernmap::routing::{RouteGeometry, RoutingClient, RoutingError};
use vernmap::search::DEFAULT_SEARCH_RADIUS_M;
use vernmap::source::{FacilitySource, FileSource};

// ============================================================================
// Test Helpers
// ============================================================================

/// Scriptable routing client: fails for destinations near any configured
/// failure point, otherwise answers with a straight two-vertex route.
/// Every requested destination is recorded.
#[derive(Default, Clone)]
struct ScriptedRouting {
    fail_near: Vec<GeoPoint>,
    destinations: Arc<Mutex<Vec<GeoPoint>>>,
}

impl ScriptedRouting {
    fn failing_near(point: GeoPoint) -> Self {
        Self {
            fail_near: vec![point],
            ..Default::default()
        }
    }

    fn requested(&self) -> Vec<GeoPoint> {
        self.destinations.lock().unwrap().clone()
    }
}

impl RoutingClient for ScriptedRouting {
    async fn resolve_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<RouteGeometry, RoutingError> {
        self.destinations.lock().unwrap().push(to);
        if self.fail_near.iter().any(|p| distance_meters(*p, to) < 1.0) {
            return Err(RoutingError::Service {
                code: "NoRoute".to_string(),
                message: Some("Impossible route between points".to_string()),
            });
        }
        Ok(RouteGeometry {
            points: vec![from, to],
        })
    }
}

/// Sink that records every lookup result it is handed.
#[derive(Default)]
struct RecordingSink {
    results: Mutex<Vec<LookupResult>>,
}

impl PresentationSink for RecordingSink {
    fn on_facilities_loaded(
        &self,
        _shelters: &[vernmap::facility::FacilityPoint],
        _bunkers: &[vernmap::facility::FacilityPoint],
    ) {
    }

    fn on_lookup_result(&self, result: &LookupResult) {
        self.results.lock().unwrap().push(result.clone());
    }
}

/// Kristiansand-area fixture positions.
const SHELTER_POS: GeoPoint = GeoPoint {
    lat: 58.1700,
    lon: 8.0100,
};
const BUNKER_POS: GeoPoint = GeoPoint {
    lat: 58.1650,
    lon: 8.0050,
};
const QUERY: GeoPoint = GeoPoint {
    lat: 58.1690,
    lon: 8.0090,
};

/// Build the registries through the real load path: shelters from
/// geographic rows, bunkers from projected rows that reproject back to
/// `BUNKER_POS`.
fn fixture_registries() -> (FacilityRegistry, FacilityRegistry) {
    let shelter_rows: Vec<ShelterRecord> = serde_json::from_str(&format!(
        r#"[{{"geom": {{"type": "Point", "coordinates": [{}, {}]}}}}]"#,
        SHELTER_POS.lon, SHELTER_POS.lat
    ))
    .unwrap();

    let (easting, northing) = geographic_to_utm(BUNKER_POS, 32).unwrap();
    let bunker_rows: Vec<BunkerRecord> = serde_json::from_str(&format!(
        r#"[{{
            "geom": {{"type": "Point", "coordinates": [{easting}, {northing}]}},
            "adresse": "Festningsgata 2",
            "plasser": 480,
            "romnr": "R1"
        }}]"#
    ))
    .unwrap();

    (
        FacilityRegistry::from_shelter_records(&shelter_rows),
        FacilityRegistry::from_bunker_records(&bunker_rows),
    )
}

fn fixture_service(
    routing: ScriptedRouting,
) -> (LookupService<ScriptedRouting>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let (shelters, bunkers) = fixture_registries();
    let service = LookupService::new(
        shelters,
        bunkers,
        routing,
        Arc::clone(&sink) as Arc<dyn PresentationSink>,
    );
    (service, sink)
}

// ============================================================================
// Registry → Lookup scenario
// ============================================================================

/// The headline scenario: one shelter, one bunker loaded through their
/// source representations; a nearby query matches both with geodesic
/// distances and resolves a route to each.
#[tokio::test]
async fn test_lookup_scenario_distances_and_routes() {
    let routing = ScriptedRouting::default();
    let (mut service, _sink) = fixture_service(routing.clone());

    let result = service.on_geolocation_fix(QUERY).await;

    let shelter = result.shelter.facility.as_ref().expect("shelter matched");
    let bunker = result.bunker.facility.as_ref().expect("bunker matched");

    // Distances match the geodesic truth within 5%
    let shelter_truth = distance_meters(QUERY, shelter.position);
    let bunker_truth = distance_meters(QUERY, bunker.position);
    assert!((result.shelter.distance_m - shelter_truth).abs() <= shelter_truth * 0.05);
    assert!((result.bunker.distance_m - bunker_truth).abs() <= bunker_truth * 0.05);

    // The fixture geometry: shelter a couple hundred meters out, bunker
    // roughly half a kilometer, shelter strictly nearer
    assert!(
        result.shelter.distance_m > 50.0 && result.shelter.distance_m < 250.0,
        "Shelter distance out of expected envelope: {}",
        result.shelter.distance_m
    );
    assert!(
        result.bunker.distance_m > 300.0 && result.bunker.distance_m < 800.0,
        "Bunker distance out of expected envelope: {}",
        result.bunker.distance_m
    );
    assert!(result.shelter.distance_m < result.bunker.distance_m);

    // Bunker attributes survive the load path
    let details = bunker.bunker_details().expect("bunker details");
    assert_eq!(details.capacity, Some(480));
    assert_eq!(details.address.as_deref(), Some("Festningsgata 2"));

    // Both routes resolved, connecting the query to each facility
    let shelter_route = result.shelter_route.expect("shelter route");
    assert_eq!(shelter_route.points.first(), Some(&QUERY));
    let bunker_route = result.bunker_route.expect("bunker route");
    let end = bunker_route.points.last().unwrap();
    assert!(distance_meters(*end, BUNKER_POS) < 1.0);

    // Exactly one route request per matched facility
    assert_eq!(routing.requested().len(), 2);
}

/// A query farther than the search radius from everything matches
/// nothing and must not issue any route request.
#[tokio::test]
async fn test_far_query_matches_nothing_and_skips_routing() {
    let routing = ScriptedRouting::default();
    let (mut service, sink) = fixture_service(routing.clone());

    // Trondheim, several hundred kilometers from the fixtures
    let result = service.on_map_click(GeoPoint::new(63.4305, 10.3951)).await;

    assert!(result.shelter.facility.is_none());
    assert!(result.bunker.facility.is_none());
    assert_eq!(result.shelter.distance_m, DEFAULT_SEARCH_RADIUS_M);
    assert_eq!(result.bunker.distance_m, DEFAULT_SEARCH_RADIUS_M);
    assert!(result.shelter_route.is_none());
    assert!(result.bunker_route.is_none());
    assert!(routing.requested().is_empty(), "No route may be requested");

    // The empty outcome still reaches the presentation sink explicitly
    assert_eq!(sink.results.lock().unwrap().len(), 1);
}

// ============================================================================
// Failure containment
// ============================================================================

/// A routing failure for one kind leaves the nearest result populated
/// and the other kind's route intact.
#[tokio::test]
async fn test_shelter_route_failure_keeps_bunker_route() {
    let routing = ScriptedRouting::failing_near(SHELTER_POS);
    let (mut service, _sink) = fixture_service(routing);

    let result = service.on_geolocation_fix(QUERY).await;

    assert!(result.shelter.facility.is_some(), "Nearest result survives");
    assert!(result.shelter_route.is_none(), "Failed route is absent");
    assert!(result.bunker_route.is_some(), "Other kind is unaffected");

    let display = service.display(QuerySource::GeolocationFix);
    assert!(display.shelter_route.is_none());
    assert!(display.bunker_route.is_some());
}

/// Moving the custom marker never disturbs the geolocation display, and
/// vice versa.
#[tokio::test]
async fn test_query_sources_keep_independent_displays() {
    let (mut service, _sink) = fixture_service(ScriptedRouting::default());

    service.on_geolocation_fix(QUERY).await;
    let geolocation_display = service.display(QuerySource::GeolocationFix).clone();
    assert!(geolocation_display.bunker_route.is_some());

    // Click, then drag, the custom marker elsewhere
    service.on_map_click(GeoPoint::new(58.1800, 8.0200)).await;
    service
        .on_marker_drag_end(GeoPoint::new(58.1600, 8.0000))
        .await;

    assert_eq!(
        service.display(QuerySource::GeolocationFix),
        &geolocation_display,
        "Custom-marker lookups must not touch the geolocation display"
    );

    let marker_display = service.display(QuerySource::CustomMarker);
    assert_eq!(
        marker_display.marker,
        Some(GeoPoint::new(58.1600, 8.0000)),
        "Drag-end replaces the marker display wholesale"
    );
}

/// Successive lookups for the same source replace the drawn routes:
/// at most one route per kind is ever displayed.
#[tokio::test]
async fn test_successive_lookups_replace_routes_per_kind() {
    let (mut service, _sink) = fixture_service(ScriptedRouting::default());

    service.on_map_click(GeoPoint::new(58.1680, 8.0080)).await;
    let first = service.display(QuerySource::CustomMarker).clone();

    service.on_marker_drag_end(QUERY).await;
    let second = service.display(QuerySource::CustomMarker);

    assert_ne!(
        first.shelter_route, second.shelter_route,
        "The stale shelter route must be replaced"
    );
    assert_eq!(
        second.shelter_route.as_ref().unwrap().points.first(),
        Some(&QUERY),
        "The drawn route connects the current query position"
    );
}

// ============================================================================
// Source → registry pipeline
// ============================================================================

/// Rows read from files flow through registry population (including
/// best-effort skipping) into a working lookup service.
#[tokio::test]
async fn test_file_source_to_lookup_pipeline() {
    let mut shelter_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        shelter_file,
        r#"[
            {{"geom": {{"type": "Point", "coordinates": [{}, {}]}}}},
            {{"geom": null}},
            {{"geom": {{"type": "Point", "coordinates": [200.0, 95.0]}}}}
        ]"#,
        SHELTER_POS.lon, SHELTER_POS.lat
    )
    .unwrap();

    let (easting, northing) = geographic_to_utm(BUNKER_POS, 32).unwrap();
    let mut bunker_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        bunker_file,
        r#"[{{"geom": {{"type": "Point", "coordinates": [{easting}, {northing}]}}, "plasser": 480}}]"#
    )
    .unwrap();

    let source = FileSource::new()
        .with_shelters(shelter_file.path())
        .with_bunkers(bunker_file.path());

    let shelters = FacilityRegistry::from_shelter_records(&source.fetch_shelters().await.unwrap());
    let bunkers = FacilityRegistry::from_bunker_records(&source.fetch_bunkers().await.unwrap());

    assert_eq!(shelters.len(), 1, "Malformed shelter rows are skipped");
    assert_eq!(bunkers.len(), 1);

    let mut service = LookupService::new(
        shelters,
        bunkers,
        ScriptedRouting::default(),
        Arc::new(vernmap::lookup::NoopSink),
    );
    let result = service.on_map_click(QUERY).await;

    assert!(result.shelter.facility.is_some());
    assert!(result.bunker.facility.is_some());
}
