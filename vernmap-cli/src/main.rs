//! VernMap CLI - Command-line interface
//!
//! This binary provides a command-line interface to the VernMap library:
//! loading facility data, running nearest-facility lookups with walking
//! routes, and analyzing shelter coverage inside a drawn area.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vernmap::config::Settings;
use vernmap::logging;

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "vernmap")]
#[command(about = "Shelter and bunker lookups for the civil-defense map", long_about = None)]
#[command(version = vernmap::VERSION)]
struct Cli {
    /// Configuration file (defaults to vernmap.ini in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip log file creation; log to stderr only
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the registries and print what registered
    Facilities(commands::facilities::FacilitiesArgs),
    /// Find the nearest shelter and bunker to a position, with routes
    Lookup(commands::lookup::LookupArgs),
    /// Population and shelter capacity inside a circle
    Analyze(commands::analyze::AnalyzeArgs),
}

fn default_config_path() -> PathBuf {
    PathBuf::from("vernmap.ini")
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let settings = match Settings::load_from(&config_path) {
        Ok(settings) => settings,
        Err(e) => CliError::Config(e).exit(),
    };

    let _logging_guard = if cli.no_log_file {
        None
    } else {
        match logging::init_logging(&settings.logging.directory, &settings.logging.file) {
            Ok(guard) => Some(guard),
            Err(e) => CliError::LoggingInit(e.to_string()).exit(),
        }
    };

    let outcome = match cli.command {
        Command::Facilities(args) => commands::facilities::run(args, &settings).await,
        Command::Lookup(args) => commands::lookup::run(args, &settings).await,
        Command::Analyze(args) => commands::analyze::run(args, &settings).await,
    };

    if let Err(e) = outcome {
        e.exit();
    }
}
