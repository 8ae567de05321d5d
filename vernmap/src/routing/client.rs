//! Routing client trait and OSRM implementation.
//!
//! The [`RoutingClient`] trait abstracts over walking-route providers,
//! allowing the lookup orchestrator to work with any service that can
//! turn two geographic points into a path. The [`OsrmClient`]
//! implementation talks to an OSRM-compatible `route/v1` HTTP endpoint
//! via `reqwest`.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::coord::GeoPoint;

use super::error::RoutingError;

/// Public OSRM demo endpoint used when no service is configured.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// Travel profile for route requests.
pub const DEFAULT_ROUTE_PROFILE: &str = "walking";

/// Explicit HTTP timeout on the transport. Route resolution itself does
/// no retry or cancellation on top of this.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// An ordered sequence of geographic points describing a walking path.
///
/// Our own type, decoupled from the service's wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Path vertices from origin to destination.
    pub points: Vec<GeoPoint>,
}

impl RouteGeometry {
    /// Number of path vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the path carries no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trait for resolving a walking route between two geographic points.
pub trait RoutingClient: Send + Sync {
    /// Resolve a walking path from `from` to `to`.
    ///
    /// Issues one request; concurrent calls are independent and may
    /// complete in any order.
    fn resolve_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> impl Future<Output = Result<RouteGeometry, RoutingError>> + Send;
}

/// OSRM `route/v1` response envelope.
///
/// Only the fields the core consumes are deserialized.
#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: geojson::Geometry,
}

/// Routing client against an OSRM-compatible HTTP service.
///
/// Uses a reusable `reqwest::Client` with connection pooling and an
/// explicit timeout.
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a client for the given service base URL and travel profile.
    pub fn new(base_url: impl Into<String>, profile: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            profile: profile.into(),
        }
    }

    /// Create a client against the public OSRM demo server with the
    /// walking profile.
    pub fn walking() -> Self {
        Self::new(DEFAULT_OSRM_BASE_URL, DEFAULT_ROUTE_PROFILE)
    }

    /// Build the request URL for a route between two points.
    ///
    /// OSRM expects `lon,lat` pairs separated by `;`, full-overview
    /// GeoJSON geometry.
    fn route_url(&self, from: GeoPoint, to: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, from.lon, from.lat, to.lon, to.lat
        )
    }
}

impl RoutingClient for OsrmClient {
    async fn resolve_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<RouteGeometry, RoutingError> {
        let url = self.route_url(from, to);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RoutingError::Http(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RoutingError::Http(e.to_string()))?;

        let route = decode_response(&bytes)?;

        debug!(
            %from,
            %to,
            vertices = route.len(),
            "Walking route resolved"
        );

        Ok(route)
    }
}

/// Decode an OSRM response body into a route geometry.
///
/// A non-`Ok` code in the payload is a service rejection even when the
/// HTTP status was 200.
fn decode_response(bytes: &[u8]) -> Result<RouteGeometry, RoutingError> {
    let payload: OsrmResponse =
        serde_json::from_slice(bytes).map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

    if payload.code != "Ok" {
        return Err(RoutingError::Service {
            code: payload.code,
            message: payload.message,
        });
    }

    let route = payload
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::InvalidResponse("payload carries no routes".to_string()))?;

    let line = geo::LineString::try_from(route.geometry.value)
        .map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

    let points: Vec<GeoPoint> = line
        .coords()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect();

    if points.len() < 2 {
        return Err(RoutingError::InvalidResponse(
            "route geometry has fewer than two vertices".to_string(),
        ));
    }

    Ok(RouteGeometry { points })
}
