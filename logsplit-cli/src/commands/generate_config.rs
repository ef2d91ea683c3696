//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Pre-fill a line start pattern
    #[arg(long, value_name = "REGEX")]
    pub line_start_pattern: Option<String>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration...");
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file");
        println!("2. Validate your configuration:");
        println!("   logsplit validate --config {}", self.output.display());
        println!("3. Use it for splitting:");
        println!(
            "   logsplit split -i app.log --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Render the configuration with a short header
    fn generate_template(&self) -> Result<String> {
        let mut config = CliConfig::default();
        if let Some(pattern) = &self.line_start_pattern {
            config.splitter.multiline.line_start_pattern = pattern.clone();
        }
        config.processor()?;

        let body = config.to_toml()?;
        Ok(format!(
            "# logsplit configuration\n\
             #\n\
             # encoding: WHATWG label, or \"nop\" for raw fixed-size chunks\n\
             # force_flush_period_ms: emit an idle partial record after this long (0 = never)\n\
             # multiline: set at most one of line_start_pattern / line_end_pattern\n\
             \n{body}"
        ))
    }
}
