//! Facility data sources.
//!
//! The registries are populated from a read-only external store the core
//! treats as opaque: a hosted REST database in production, local JSON
//! files for fixtures and offline use. Implementations return raw rows;
//! validation, reprojection and skipping happen at registry population.

mod file;
mod rest;

pub use file::FileSource;
pub use rest::RestSource;

use std::future::Future;

use thiserror::Error;

use crate::facility::{BunkerRecord, ShelterRecord};
use crate::population::PopulationRecord;

/// Errors that can occur while fetching rows from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport failure or non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Rows could not be parsed.
    #[error("Failed to parse rows: {0}")]
    Parse(String),

    /// Local file could not be read.
    #[error("Failed to read {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

/// Trait for fetching facility and population rows.
pub trait FacilitySource: Send + Sync {
    /// Fetch shelter rows.
    fn fetch_shelters(
        &self,
    ) -> impl Future<Output = Result<Vec<ShelterRecord>, SourceError>> + Send;

    /// Fetch bunker rows.
    fn fetch_bunkers(&self) -> impl Future<Output = Result<Vec<BunkerRecord>, SourceError>> + Send;

    /// Fetch population rows.
    fn fetch_population(
        &self,
    ) -> impl Future<Output = Result<Vec<PopulationRecord>, SourceError>> + Send;
}
