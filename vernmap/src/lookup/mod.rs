//! Lookup orchestration.
//!
//! A lookup takes one query position — a geolocation fix or a
//! user-placed marker — finds the nearest shelter and the nearest bunker,
//! resolves a walking route to each hit, and hands the combined result to
//! the presentation sink.
//!
//! # Display state
//!
//! What is currently drawn is explicit state owned by the service: one
//! [`DisplayState`] per query source, replaced wholesale on every lookup
//! for that source. The geolocation marker and the custom marker keep
//! independent result sets — moving one never disturbs the other.
//!
//! # Concurrency
//!
//! Nearest-facility search is synchronous; the two route resolutions for
//! a query run concurrently and may complete in either order. Route
//! updates are scoped per facility kind, so one kind's failure never
//! blocks or rolls back the other's result. There is no cancellation:
//! lookups on one service handle are serialized by `&mut self`, and the
//! last completed lookup wins.

mod sink;

pub use sink::{format_distance, NoopSink, PresentationSink};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::coord::GeoPoint;
use crate::facility::{FacilityKind, FacilityRegistry};
use crate::routing::{RouteGeometry, RoutingClient};
use crate::search::{self, NearestResult, DEFAULT_SEARCH_RADIUS_M};

/// What triggered a lookup.
///
/// Each source keeps its own display state; results from one source
/// never interfere with the other's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuerySource {
    /// A successful geolocation fix.
    GeolocationFix,
    /// A user-placed (or dragged) custom marker.
    CustomMarker,
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySource::GeolocationFix => write!(f, "geolocation"),
            QuerySource::CustomMarker => write!(f, "custom-marker"),
        }
    }
}

/// The combined outcome of one lookup.
///
/// Recomputed from scratch on every query; never incrementally updated.
/// Partial results are valid terminal states — an absent facility or an
/// absent route is an explicit outcome, not a pending one.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// What triggered the lookup.
    pub source: QuerySource,
    /// The query position the lookup ran against.
    pub query: GeoPoint,
    /// Nearest shelter, or absent.
    pub shelter: NearestResult,
    /// Nearest bunker, or absent.
    pub bunker: NearestResult,
    /// Walking route to the shelter, if one was resolved.
    pub shelter_route: Option<RouteGeometry>,
    /// Walking route to the bunker, if one was resolved.
    pub bunker_route: Option<RouteGeometry>,
}

/// What is currently drawn for one query source.
///
/// At most one route per facility kind; a newly resolved route of a kind
/// replaces the previous one of that kind, never the other kind's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// The query marker position, if a lookup has run.
    pub marker: Option<GeoPoint>,
    /// Currently drawn shelter route.
    pub shelter_route: Option<RouteGeometry>,
    /// Currently drawn bunker route.
    pub bunker_route: Option<RouteGeometry>,
}

/// The lookup orchestrator.
///
/// Owns the facility registries (read-only after population), the
/// routing client, and the per-source display state.
pub struct LookupService<R: RoutingClient> {
    shelters: FacilityRegistry,
    bunkers: FacilityRegistry,
    routing: R,
    sink: Arc<dyn PresentationSink>,
    max_radius_m: f64,
    geolocation_display: DisplayState,
    marker_display: DisplayState,
}

impl<R: RoutingClient> LookupService<R> {
    /// Create a service over populated registries.
    ///
    /// Announces the loaded facilities to the presentation sink.
    pub fn new(
        shelters: FacilityRegistry,
        bunkers: FacilityRegistry,
        routing: R,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self::with_radius(shelters, bunkers, routing, sink, DEFAULT_SEARCH_RADIUS_M)
    }

    /// Create a service with a non-default search radius.
    pub fn with_radius(
        shelters: FacilityRegistry,
        bunkers: FacilityRegistry,
        routing: R,
        sink: Arc<dyn PresentationSink>,
        max_radius_m: f64,
    ) -> Self {
        sink.on_facilities_loaded(shelters.as_slice(), bunkers.as_slice());
        Self {
            shelters,
            bunkers,
            routing,
            sink,
            max_radius_m,
            geolocation_display: DisplayState::default(),
            marker_display: DisplayState::default(),
        }
    }

    /// A geolocation fix arrived.
    pub async fn on_geolocation_fix(&mut self, position: GeoPoint) -> LookupResult {
        self.lookup(QuerySource::GeolocationFix, position).await
    }

    /// The user clicked the map, placing the custom marker.
    pub async fn on_map_click(&mut self, position: GeoPoint) -> LookupResult {
        self.lookup(QuerySource::CustomMarker, position).await
    }

    /// The user finished dragging the custom marker.
    pub async fn on_marker_drag_end(&mut self, position: GeoPoint) -> LookupResult {
        self.lookup(QuerySource::CustomMarker, position).await
    }

    /// Run a full lookup for a query position.
    ///
    /// Never fails outright: a malformed query position is logged and
    /// yields a result with both facilities absent; a route failure
    /// leaves only that kind's route absent.
    pub async fn lookup(&mut self, source: QuerySource, query: GeoPoint) -> LookupResult {
        let (shelter, bunker) = self.nearest_pair(query);

        // Shelter and bunker routes resolve concurrently; completions
        // are independent and may land in either order.
        let shelter_fut = self.route_for(query, FacilityKind::Shelter, &shelter);
        let bunker_fut = self.route_for(query, FacilityKind::Bunker, &bunker);
        let (shelter_route, bunker_route) = tokio::join!(shelter_fut, bunker_fut);

        let result = LookupResult {
            source,
            query,
            shelter,
            bunker,
            shelter_route,
            bunker_route,
        };

        self.apply_to_display(&result);
        self.sink.on_lookup_result(&result);

        debug!(
            %source,
            %query,
            shelter_found = result.shelter.found(),
            bunker_found = result.bunker.found(),
            shelter_route = result.shelter_route.is_some(),
            bunker_route = result.bunker_route.is_some(),
            "Lookup completed"
        );

        result
    }

    /// What is currently drawn for a query source.
    pub fn display(&self, source: QuerySource) -> &DisplayState {
        match source {
            QuerySource::GeolocationFix => &self.geolocation_display,
            QuerySource::CustomMarker => &self.marker_display,
        }
    }

    /// The configured search radius in meters.
    pub fn max_radius_m(&self) -> f64 {
        self.max_radius_m
    }

    fn nearest_pair(&self, query: GeoPoint) -> (NearestResult, NearestResult) {
        let shelter = search::find_nearest(query, self.shelters.as_slice(), self.max_radius_m);
        let bunker = search::find_nearest(query, self.bunkers.as_slice(), self.max_radius_m);
        match (shelter, bunker) {
            (Ok(shelter), Ok(bunker)) => (shelter, bunker),
            (shelter, bunker) => {
                if let Err(e) = &shelter {
                    error!(%query, error = %e, "Query position rejected by shelter search");
                }
                if let Err(e) = &bunker {
                    error!(%query, error = %e, "Query position rejected by bunker search");
                }
                (
                    shelter.unwrap_or_else(|_| NearestResult::absent(self.max_radius_m)),
                    bunker.unwrap_or_else(|_| NearestResult::absent(self.max_radius_m)),
                )
            }
        }
    }

    /// Resolve the route for one kind's nearest hit, if any.
    ///
    /// A failure is contained here: it is logged and becomes an absent
    /// route, never an error for the lookup.
    async fn route_for(
        &self,
        query: GeoPoint,
        kind: FacilityKind,
        nearest: &NearestResult,
    ) -> Option<RouteGeometry> {
        let facility = nearest.facility.as_ref()?;
        match self.routing.resolve_route(query, facility.position).await {
            Ok(route) => Some(route),
            Err(e) => {
                warn!(%kind, %query, error = %e, "Route unavailable");
                None
            }
        }
    }

    /// Replace the triggering source's display state with the new
    /// result.
    ///
    /// Route slots are cleared per kind before the new route (if any)
    /// lands, so a stale route never outlives the query that produced
    /// it and the two kinds never clobber each other.
    fn apply_to_display(&mut self, result: &LookupResult) {
        let display = match result.source {
            QuerySource::GeolocationFix => &mut self.geolocation_display,
            QuerySource::CustomMarker => &mut self.marker_display,
        };

        display.marker = Some(result.query);

        display.shelter_route = None;
        if let Some(route) = &result.shelter_route {
            display.shelter_route = Some(route.clone());
        }

        display.bunker_route = None;
        if let Some(route) = &result.bunker_route {
            display.bunker_route = Some(route.clone());
        }
    }
}
