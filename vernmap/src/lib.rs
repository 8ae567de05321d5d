//! VernMap - civil-defense shelter lookup core
//!
//! This library backs a map client that shows shelter and bunker
//! locations, finds the nearest facility to a position, and resolves
//! walking routes to it via an external routing service. Rendering is an
//! external collaborator behind [`lookup::PresentationSink`]; data comes
//! from an opaque read-only store behind [`source::FacilitySource`].
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use vernmap::coord::GeoPoint;
//! use vernmap::facility::FacilityRegistry;
//! use vernmap::lookup::{LookupService, NoopSink};
//! use vernmap::routing::OsrmClient;
//! use vernmap::source::{FacilitySource, FileSource};
//!
//! let source = FileSource::new()
//!     .with_shelters("shelters.json")
//!     .with_bunkers("bunkers.json");
//! let shelters = FacilityRegistry::from_shelter_records(&source.fetch_shelters().await?);
//! let bunkers = FacilityRegistry::from_bunker_records(&source.fetch_bunkers().await?);
//!
//! let mut service =
//!     LookupService::new(shelters, bunkers, OsrmClient::walking(), Arc::new(NoopSink));
//! let result = service.on_map_click(GeoPoint::new(58.1690, 8.0090)).await;
//! ```

pub mod analysis;
pub mod config;
pub mod coord;
pub mod facility;
pub mod logging;
pub mod lookup;
pub mod population;
pub mod projection;
pub mod routing;
pub mod search;
pub mod source;

/// Version of the VernMap library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
