//! `lookup` command: nearest shelter and bunker with walking routes.

use std::sync::Arc;

use clap::{Args, ValueEnum};

use vernmap::config::Settings;
use vernmap::lookup::{format_distance, LookupResult, LookupService, NoopSink};
use vernmap::routing::OsrmClient;
use vernmap::search::NearestResult;

use super::common::{query_position, DataArgs};
use crate::error::CliError;

#[derive(Debug, Clone, ValueEnum)]
pub enum SourceKind {
    /// Treat the position as a geolocation fix
    Geolocation,
    /// Treat the position as a user-placed marker
    Marker,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Query latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Query longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Which marker the lookup belongs to
    #[arg(long, value_enum, default_value = "marker")]
    pub source: SourceKind,

    /// Search radius in meters (overrides configuration)
    #[arg(long)]
    pub radius: Option<f64>,

    #[command(flatten)]
    pub data: DataArgs,
}

pub async fn run(args: LookupArgs, settings: &Settings) -> Result<(), CliError> {
    let query = query_position(args.lat, args.lon)?;
    let radius = args.radius.unwrap_or(settings.search.max_radius_m);
    if radius <= 0.0 {
        return Err(CliError::InvalidInput(format!(
            "search radius must be positive, got {}",
            radius
        )));
    }

    let loaded = args.data.load(settings).await?;
    let routing = OsrmClient::new(
        settings.routing.base_url.clone(),
        settings.routing.profile.clone(),
    );

    let mut service = LookupService::with_radius(
        loaded.shelters,
        loaded.bunkers,
        routing,
        Arc::new(NoopSink),
        radius,
    );

    let result = match args.source {
        SourceKind::Geolocation => service.on_geolocation_fix(query).await,
        SourceKind::Marker => service.on_map_click(query).await,
    };

    print_result(&result, radius);
    Ok(())
}

fn print_result(result: &LookupResult, radius: f64) {
    println!("Query position: {}", result.query);

    print_nearest("shelter", &result.shelter, radius);
    if result.shelter.found() {
        match &result.shelter_route {
            Some(route) => println!("  walking route: {} vertices", route.len()),
            None => println!("  walking route: unavailable"),
        }
    }

    print_nearest("bunker", &result.bunker, radius);
    if let Some(facility) = &result.bunker.facility {
        if let Some(details) = facility.bunker_details() {
            if let Some(address) = &details.address {
                println!("  address: {}", address);
            }
            if let Some(capacity) = details.capacity {
                println!("  places: {}", capacity);
            }
            if let Some(room) = &details.room_number {
                println!("  room: {}", room);
            }
        }
        match &result.bunker_route {
            Some(route) => println!("  walking route: {} vertices", route.len()),
            None => println!("  walking route: unavailable"),
        }
    }
}

fn print_nearest(kind: &str, nearest: &NearestResult, radius: f64) {
    match &nearest.facility {
        Some(facility) => println!(
            "Nearest {}: {} away at {}",
            kind,
            format_distance(nearest.distance_m),
            facility.position
        ),
        None => println!(
            "No {} found within {}",
            kind,
            format_distance(radius)
        ),
    }
}
