//! Application configuration.
//!
//! Settings load from an INI file with sensible defaults for every
//! value; a missing file simply yields the defaults. One struct per
//! `[section]`, pure data, parsed and validated here.

use std::path::Path;

use ini::Ini;
use thiserror::Error;

use crate::projection::{Crs, BUNKER_SOURCE_CRS};
use crate::routing::{DEFAULT_OSRM_BASE_URL, DEFAULT_ROUTE_PROFILE};
use crate::search::DEFAULT_SEARCH_RADIUS_M;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the config file.
    #[error("Failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Complete application configuration.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// `[data_source]` — hosted database access.
    pub data_source: DataSourceSettings,
    /// `[routing]` — walking-route service.
    pub routing: RoutingSettings,
    /// `[search]` — nearest-facility search.
    pub search: SearchSettings,
    /// `[logging]` — log output.
    pub logging: LoggingSettings,
}

/// Hosted database access.
#[derive(Debug, Clone)]
pub struct DataSourceSettings {
    /// Project base URL (empty means the REST source is unconfigured).
    pub base_url: String,
    /// Project API key, sent as `apikey` and bearer token.
    pub api_key: String,
    /// Shelter table name.
    pub shelter_table: String,
    /// Bunker table name.
    pub bunker_table: String,
    /// Population table name.
    pub population_table: String,
    /// Reference system the bunker table's geometry is stored in.
    pub bunker_crs: Crs,
    /// Row limit for shelter fetches.
    pub shelter_limit: u32,
    /// Row limit for bunker fetches.
    pub bunker_limit: u32,
    /// Row limit for population fetches.
    pub population_limit: u32,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            shelter_table: "osm_shelter_type_basic_hut_agder".to_string(),
            bunker_table: "tilfluktsrom_offentlige".to_string(),
            population_table: "befolkning_agder".to_string(),
            bunker_crs: BUNKER_SOURCE_CRS,
            shelter_limit: 100,
            bunker_limit: 65,
            population_limit: 200,
        }
    }
}

/// Walking-route service.
#[derive(Debug, Clone)]
pub struct RoutingSettings {
    /// Service base URL.
    pub base_url: String,
    /// Travel profile.
    pub profile: String,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_BASE_URL.to_string(),
            profile: DEFAULT_ROUTE_PROFILE.to_string(),
        }
    }
}

/// Nearest-facility search.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Maximum search radius in meters.
    pub max_radius_m: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_radius_m: DEFAULT_SEARCH_RADIUS_M,
        }
    }
}

/// Log output.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directory for log files.
    pub directory: String,
    /// Log file name.
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file: "vernmap.log".to_string(),
        }
    }
}

impl Settings {
    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }
}

fn parse_ini(ini: &Ini) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(props) = ini.section(Some("data_source")) {
        if let Some(v) = props.get("base_url") {
            settings.data_source.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = props.get("api_key") {
            settings.data_source.api_key = v.to_string();
        }
        if let Some(v) = props.get("shelter_table") {
            settings.data_source.shelter_table = v.to_string();
        }
        if let Some(v) = props.get("bunker_table") {
            settings.data_source.bunker_table = v.to_string();
        }
        if let Some(v) = props.get("population_table") {
            settings.data_source.population_table = v.to_string();
        }
        if let Some(v) = props.get("bunker_crs") {
            settings.data_source.bunker_crs =
                Crs::from_epsg(v).map_err(|e| ConfigError::InvalidValue {
                    section: "data_source".to_string(),
                    key: "bunker_crs".to_string(),
                    value: v.to_string(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(v) = props.get("shelter_limit") {
            settings.data_source.shelter_limit = parse_u32("data_source", "shelter_limit", v)?;
        }
        if let Some(v) = props.get("bunker_limit") {
            settings.data_source.bunker_limit = parse_u32("data_source", "bunker_limit", v)?;
        }
        if let Some(v) = props.get("population_limit") {
            settings.data_source.population_limit =
                parse_u32("data_source", "population_limit", v)?;
        }
    }

    if let Some(props) = ini.section(Some("routing")) {
        if let Some(v) = props.get("base_url") {
            settings.routing.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = props.get("profile") {
            settings.routing.profile = v.to_string();
        }
    }

    if let Some(props) = ini.section(Some("search")) {
        if let Some(v) = props.get("max_radius_m") {
            let radius = parse_f64("search", "max_radius_m", v)?;
            if radius <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    section: "search".to_string(),
                    key: "max_radius_m".to_string(),
                    value: v.to_string(),
                    reason: "must be positive".to_string(),
                });
            }
            settings.search.max_radius_m = radius;
        }
    }

    if let Some(props) = ini.section(Some("logging")) {
        if let Some(v) = props.get("directory") {
            settings.logging.directory = v.to_string();
        }
        if let Some(v) = props.get("file") {
            settings.logging.file = v.to_string();
        }
    }

    Ok(settings)
}

fn parse_u32(section: &str, key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected a non-negative integer".to_string(),
    })
}

fn parse_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected a number".to_string(),
    })
}
