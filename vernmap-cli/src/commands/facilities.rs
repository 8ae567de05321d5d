//! `facilities` command: load the registries and print what registered.

use clap::Args;

use vernmap::config::Settings;

use super::common::DataArgs;
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct FacilitiesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Also list each facility position
    #[arg(long)]
    pub list: bool,
}

pub async fn run(args: FacilitiesArgs, settings: &Settings) -> Result<(), CliError> {
    let loaded = args.data.load(settings).await?;

    println!("Shelters:   {}", loaded.shelters.len());
    println!("Bunkers:    {}", loaded.bunkers.len());
    println!(
        "Population: {} areas, {} people",
        loaded.population.len(),
        loaded.population.total_population()
    );

    if args.list {
        for facility in loaded.shelters.iter() {
            println!("  shelter  {}", facility.position);
        }
        for facility in loaded.bunkers.iter() {
            match facility.bunker_details() {
                Some(details) => println!(
                    "  bunker   {}  {}  places: {}",
                    facility.position,
                    details.address.as_deref().unwrap_or("-"),
                    details
                        .capacity
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                None => println!("  bunker   {}", facility.position),
            }
        }
    }

    Ok(())
}
