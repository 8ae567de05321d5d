//! Local JSON file data source.
//!
//! Reads the same row shapes as the hosted store from files on disk —
//! for fixtures, demos and offline use. A dataset without a configured
//! path is simply empty, mirroring how the upstream page renders a
//! missing dataset as no layer rather than an error.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::facility::{BunkerRecord, ShelterRecord};
use crate::population::PopulationRecord;

use super::{FacilitySource, SourceError};

/// Data source over local JSON files (one array of rows per file).
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    shelters: Option<PathBuf>,
    bunkers: Option<PathBuf>,
    population: Option<PathBuf>,
}

impl FileSource {
    /// Create a source with no datasets configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the shelter rows file.
    pub fn with_shelters(mut self, path: impl Into<PathBuf>) -> Self {
        self.shelters = Some(path.into());
        self
    }

    /// Configure the bunker rows file.
    pub fn with_bunkers(mut self, path: impl Into<PathBuf>) -> Self {
        self.bunkers = Some(path.into());
        self
    }

    /// Configure the population rows file.
    pub fn with_population(mut self, path: impl Into<PathBuf>) -> Self {
        self.population = Some(path.into());
        self
    }

    fn read_rows<T: DeserializeOwned>(path: &Option<PathBuf>) -> Result<Vec<T>, SourceError> {
        let Some(path) = path else {
            return Ok(Vec::new());
        };

        let bytes = std::fs::read(path).map_err(|error| SourceError::Io {
            path: path.display().to_string(),
            error,
        })?;

        let rows: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|e| SourceError::Parse(e.to_string()))?;

        debug!(path = %path.display(), rows = rows.len(), "Rows read");
        Ok(rows)
    }
}

impl FacilitySource for FileSource {
    async fn fetch_shelters(&self) -> Result<Vec<ShelterRecord>, SourceError> {
        Self::read_rows(&self.shelters)
    }

    async fn fetch_bunkers(&self) -> Result<Vec<BunkerRecord>, SourceError> {
        Self::read_rows(&self.bunkers)
    }

    async fn fetch_population(&self) -> Result<Vec<PopulationRecord>, SourceError> {
        Self::read_rows(&self.population)
    }
}
