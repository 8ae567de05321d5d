//! `analyze` command: population and shelter capacity inside a circle.

use clap::Args;

use vernmap::analysis::{analyze, AnalysisShape};
use vernmap::config::Settings;

use super::common::{query_position, DataArgs};
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Circle center latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Circle center longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Circle radius in meters
    #[arg(long, default_value = "1000")]
    pub radius: f64,

    #[command(flatten)]
    pub data: DataArgs,
}

pub async fn run(args: AnalyzeArgs, settings: &Settings) -> Result<(), CliError> {
    let center = query_position(args.lat, args.lon)?;
    if args.radius <= 0.0 {
        return Err(CliError::InvalidInput(format!(
            "circle radius must be positive, got {}",
            args.radius
        )));
    }

    let loaded = args.data.load(settings).await?;
    let shape = AnalysisShape::circle(center, args.radius);

    let report = analyze(
        &shape,
        loaded.population.as_slice(),
        loaded.bunkers.as_slice(),
    );

    println!("Area: {} m circle around {}", args.radius, center);
    println!("Population:       {}", report.total_population);
    println!("Shelter capacity: {}", report.shelter_capacity);
    println!("Coverage:         {:.2}%", report.coverage_percent);

    Ok(())
}
