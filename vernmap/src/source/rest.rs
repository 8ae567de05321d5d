//! Hosted REST data source.
//!
//! Reads rows from a Supabase-style REST interface:
//! `GET {base}/rest/v1/{table}?select=*&limit={n}` with the project key
//! sent both as `apikey` and as a bearer token. The store is read-only;
//! each registry is fetched once at startup.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DataSourceSettings;
use crate::facility::{BunkerRecord, ShelterRecord};
use crate::population::PopulationRecord;

use super::{FacilitySource, SourceError};

/// HTTP timeout for row fetches.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client over the hosted facility database.
pub struct RestSource {
    http: reqwest::Client,
    settings: DataSourceSettings,
}

impl RestSource {
    /// Create a client from data-source settings.
    pub fn new(settings: DataSourceSettings) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, settings }
    }

    /// Build the row-fetch URL for a table.
    fn table_url(&self, table: &str, limit: u32) -> String {
        format!(
            "{}/rest/v1/{}?select=*&limit={}",
            self.settings.base_url, table, limit
        )
    }

    /// Fetch and decode all rows of one table.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        limit: u32,
    ) -> Result<Vec<T>, SourceError> {
        let url = self.table_url(table, limit);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.settings.api_key)
            .bearer_auth(&self.settings.api_key)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http(format!(
                "table '{}' returned {}",
                table, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let rows: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|e| SourceError::Parse(e.to_string()))?;

        debug!(table, rows = rows.len(), "Rows fetched");
        Ok(rows)
    }
}

impl FacilitySource for RestSource {
    async fn fetch_shelters(&self) -> Result<Vec<ShelterRecord>, SourceError> {
        self.fetch_rows(&self.settings.shelter_table, self.settings.shelter_limit)
            .await
    }

    async fn fetch_bunkers(&self) -> Result<Vec<BunkerRecord>, SourceError> {
        self.fetch_rows(&self.settings.bunker_table, self.settings.bunker_limit)
            .await
    }

    async fn fetch_population(&self) -> Result<Vec<PopulationRecord>, SourceError> {
        self.fetch_rows(&self.settings.population_table, self.settings.population_limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DataSourceSettings {
        DataSourceSettings {
            base_url: "https://project.supabase.example".to_string(),
            api_key: "anon-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_url_shape() {
        let source = RestSource::new(settings());
        let url = source.table_url("tilfluktsrom_offentlige", 65);

        assert_eq!(
            url,
            "https://project.supabase.example/rest/v1/tilfluktsrom_offentlige?select=*&limit=65"
        );
    }

    #[test]
    fn test_default_tables_carried_from_settings() {
        let source = RestSource::new(settings());
        assert_eq!(
            source.settings.shelter_table,
            DataSourceSettings::default().shelter_table
        );
        assert_eq!(source.settings.shelter_limit, 100);
        assert_eq!(source.settings.bunker_limit, 65);
    }
}
