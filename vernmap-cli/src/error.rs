//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use std::fmt;
use std::process;

use vernmap::config::ConfigError;
use vernmap::source::SourceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigError),
    /// Failed to fetch facility data
    Data(SourceError),
    /// Invalid command-line input
    InvalidInput(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Data(SourceError::Http(_)) => {
                eprintln!();
                eprintln!("If using the hosted data source, make sure:");
                eprintln!("  1. [data_source] base_url points at your project");
                eprintln!("  2. [data_source] api_key is a valid read key");
            }
            CliError::Data(SourceError::Io { .. }) => {
                eprintln!();
                eprintln!("Check the --shelters/--bunkers/--population file paths.");
            }
            _ => {}
        }

        process::exit(self.exit_code());
    }

    fn exit_code(&self) -> i32 {
        match self {
            CliError::LoggingInit(_) => 2,
            CliError::Config(_) => 3,
            CliError::Data(_) => 4,
            CliError::InvalidInput(_) => 5,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Data(e) => write!(f, "{}", e),
            CliError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Data(e)
    }
}
