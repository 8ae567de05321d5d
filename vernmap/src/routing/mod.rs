//! Walking-route resolution against an external routing service.
//!
//! The [`RoutingClient`] trait abstracts over route providers so the
//! lookup orchestrator can be exercised with mocks; [`OsrmClient`] is the
//! production implementation against an OSRM-compatible HTTP service.
//!
//! One request per call — no retry, no caching, no deduplication. The
//! orchestrator issues the shelter and bunker requests for a query
//! concurrently and treats every failure here uniformly as "no route
//! could be drawn".

mod client;
mod error;

pub use client::{OsrmClient, RouteGeometry, RoutingClient, DEFAULT_OSRM_BASE_URL, DEFAULT_ROUTE_PROFILE};
pub use error::RoutingError;
