//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use logsplit_engine::COMMON_ENCODINGS;

pub mod generate_config;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split log files into records
    Split(split::SplitArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),

    /// Write a default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List commonly used encodings
    Encodings,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested list
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Encodings => {
                println!("Common encodings (any WHATWG label is accepted):");
                for name in COMMON_ENCODINGS {
                    println!("  {name}");
                }
                println!("  nop    raw bytes in fixed-size chunks, no decoding");
            }
            ListCommands::Formats => {
                println!("Output formats:");
                println!("  text   one record after another, newline separated");
                println!("  json   array of records with file, index, offset and length");
            }
        }
        Ok(())
    }
}
