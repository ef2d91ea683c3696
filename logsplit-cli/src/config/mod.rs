//! Configuration module

use crate::error::{CliError, CliResult};
use logsplit_engine::{LogProcessor, ReaderConfig, SplitterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration file
///
/// ```toml
/// [splitter]
/// encoding = "utf-8"
///
/// [splitter.multiline]
/// line_start_pattern = '^\d{4}-\d{2}-\d{2}'
///
/// [reader]
/// max_log_size = 1048576
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    /// How records are cut
    #[serde(default)]
    pub splitter: SplitterConfig,

    /// How files are read
    #[serde(default)]
    pub reader: ReaderConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            CliError::ConfigError(format!("Failed to parse '{}': {}", path.display(), e)).into()
        })
    }

    /// Parse a configuration from TOML
    pub fn from_toml_str(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a processor, running every configuration check
    pub fn processor(&self) -> CliResult<LogProcessor> {
        LogProcessor::with_config(self.splitter.clone(), self.reader)
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_round_trip() {
        let config = CliConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[splitter]"));
        assert!(text.contains("[splitter.multiline]"));
        assert!(text.contains("[reader]"));
        assert_eq!(CliConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[splitter.multiline]\nline_end_pattern = ';$'\n\n[reader]\nflush_at_eof = false"
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.splitter.multiline.line_end_pattern, ";$");
        assert_eq!(config.splitter.encoding, "utf-8");
        assert!(!config.reader.flush_at_eof);
        assert_eq!(config.reader.max_log_size, 1024 * 1024);
        assert!(config.processor().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_invalid_processor() {
        let config = CliConfig::from_toml_str("[splitter]\nencoding = \"nop\"\n[splitter.multiline]\nline_start_pattern = \"x\"").unwrap();
        let err = config.processor().unwrap_err();
        assert!(err.to_string().contains("nop encoding"));
    }
}
