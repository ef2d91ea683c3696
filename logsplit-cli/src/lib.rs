//! logsplit CLI library
//!
//! Command-line front end for splitting log files into records.

use clap::Parser;

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

use commands::Commands;

/// Split log files into single- or multi-line records
#[derive(Debug, Parser)]
#[command(name = "logsplit", version, about = "Split log streams into records")]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Run the selected command
    pub fn run(self) -> CliResult<()> {
        match self.command {
            Commands::Split(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}
