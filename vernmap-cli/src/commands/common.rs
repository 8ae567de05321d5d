//! Shared data-loading plumbing for the commands.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use vernmap::config::Settings;
use vernmap::coord::{self, GeoPoint};
use vernmap::facility::{BunkerRecord, FacilityRegistry, ShelterRecord};
use vernmap::population::{PopulationRecord, PopulationRegistry};
use vernmap::source::{FacilitySource, FileSource, RestSource, SourceError};

use crate::error::CliError;

/// Where facility rows come from: local JSON files when any path is
/// given, otherwise the configured hosted store.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Shelter rows JSON file
    #[arg(long)]
    pub shelters: Option<PathBuf>,

    /// Bunker rows JSON file
    #[arg(long)]
    pub bunkers: Option<PathBuf>,

    /// Population rows JSON file
    #[arg(long)]
    pub population: Option<PathBuf>,
}

/// Fully populated registries.
pub struct LoadedData {
    pub shelters: FacilityRegistry,
    pub bunkers: FacilityRegistry,
    pub population: PopulationRegistry,
}

impl DataArgs {
    fn uses_files(&self) -> bool {
        self.shelters.is_some() || self.bunkers.is_some() || self.population.is_some()
    }

    /// Fetch rows and populate the registries.
    pub async fn load(&self, settings: &Settings) -> Result<LoadedData, CliError> {
        let (shelter_rows, bunker_rows, population_rows) = if self.uses_files() {
            let mut source = FileSource::new();
            if let Some(path) = &self.shelters {
                source = source.with_shelters(path);
            }
            if let Some(path) = &self.bunkers {
                source = source.with_bunkers(path);
            }
            if let Some(path) = &self.population {
                source = source.with_population(path);
            }
            fetch_all(&source).await?
        } else if !settings.data_source.base_url.is_empty() {
            let source = RestSource::new(settings.data_source.clone());
            fetch_all(&source).await?
        } else {
            warn!("No data files given and no hosted data source configured");
            (Vec::new(), Vec::new(), Vec::new())
        };

        Ok(LoadedData {
            shelters: FacilityRegistry::from_shelter_records(&shelter_rows),
            bunkers: FacilityRegistry::from_bunker_records_in(
                &bunker_rows,
                &settings.data_source.bunker_crs,
            ),
            population: PopulationRegistry::from_records(&population_rows),
        })
    }
}

async fn fetch_all<S: FacilitySource>(
    source: &S,
) -> Result<(Vec<ShelterRecord>, Vec<BunkerRecord>, Vec<PopulationRecord>), SourceError> {
    let shelters = source.fetch_shelters().await?;
    let bunkers = source.fetch_bunkers().await?;
    let population = source.fetch_population().await?;
    Ok((shelters, bunkers, population))
}

/// Validate a lat/lon argument pair into a query position.
pub fn query_position(lat: f64, lon: f64) -> Result<GeoPoint, CliError> {
    coord::validated(lat, lon).map_err(|e| CliError::InvalidInput(e.to_string()))
}
