//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use logsplit_engine::SplitFunc;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked = CliConfig::load(&self.config).and_then(|config| {
            let processor = config.processor()?;
            let splitter = config
                .splitter
                .build(config.reader.flush_at_eof, config.reader.max_log_size)?;
            Ok((processor, splitter.strategy().name()))
        });

        match checked {
            Ok((processor, strategy)) => {
                println!("✓ Configuration is valid!");
                println!("  Encoding: {}", processor.encoding().name());
                println!("  Strategy: {strategy}");
                println!(
                    "  Max log size: {} bytes",
                    processor.reader_config().max_log_size
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
