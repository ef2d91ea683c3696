//! Top-level splitter configuration and the composed tokenizer

use crate::{
    config::DEFAULT_MAX_LOG_SIZE,
    encoding::{lookup_encoding, Encoding},
    error::{EngineError, Result},
    flusher::{Flusher, FlusherConfig},
    multiline::MultilineConfig,
};
use logsplit_core::{Split, Strategy, Tokenize, Trim};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Everything that decides how a stream is cut into records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Encoding name, resolved with [`lookup_encoding`]
    pub encoding: String,
    /// Idle-flush settings
    #[serde(flatten)]
    pub flusher: FlusherConfig,
    /// Keep whitespace at the start of each record
    pub preserve_leading_whitespaces: bool,
    /// Keep whitespace at the end of each record
    pub preserve_trailing_whitespaces: bool,
    /// Multiline policy
    pub multiline: MultilineConfig,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            flusher: FlusherConfig::default(),
            preserve_leading_whitespaces: false,
            preserve_trailing_whitespaces: false,
            multiline: MultilineConfig::default(),
        }
    }
}

impl SplitterConfig {
    /// Parse a configuration from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::IoError(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            EngineError::ConfigError(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// The trimming policy selected by the whitespace preferences
    pub fn trim(&self) -> Trim {
        Trim::select(
            self.preserve_leading_whitespaces,
            self.preserve_trailing_whitespaces,
        )
    }

    /// Resolve the configured encoding
    pub fn resolve_encoding(&self) -> Result<Encoding> {
        lookup_encoding(&self.encoding)
    }

    /// Run every build-time check without keeping the tokenizer
    pub fn validate(&self) -> Result<()> {
        self.build(true, DEFAULT_MAX_LOG_SIZE).map(|_| ())
    }

    /// Build the tokenizer for one stream
    pub fn build(&self, flush_at_eof: bool, max_log_size: usize) -> Result<Splitter> {
        let encoding = self.resolve_encoding()?;
        let strategy = self.multiline.build(
            &encoding,
            flush_at_eof,
            self.preserve_leading_whitespaces,
            self.preserve_trailing_whitespaces,
            max_log_size,
        )?;

        // Raw chunks are never trimmed, not even when flushed
        let trim = if encoding.is_nop() {
            Trim::None
        } else {
            self.trim()
        };

        Ok(Splitter {
            flusher: self.flusher.wrap(strategy, trim),
            encoding,
            flush_at_eof,
            trim,
        })
    }
}

/// A built tokenizer: the selected strategy wrapped with idle flushing
///
/// With `flush_at_eof` set, whatever the strategy still holds back once the
/// stream has ended is emitted as a final record.
#[derive(Debug, Clone)]
pub struct Splitter {
    flusher: Flusher<Strategy>,
    encoding: Encoding,
    flush_at_eof: bool,
    trim: Trim,
}

impl Splitter {
    /// The selected boundary strategy
    pub fn strategy(&self) -> &Strategy {
        self.flusher.inner()
    }

    /// The resolved encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Splitter {
    /// Run one tokenizer call at time `now`
    pub fn tokenize_at<'a>(&mut self, data: &'a [u8], at_eof: bool, now: Instant) -> Split<'a> {
        let split = self.flusher.split_at(data, at_eof, now);
        if split.is_pending() && at_eof && self.flush_at_eof && !data.is_empty() {
            log::debug!("flushing {} unterminated bytes at end of stream", data.len());
            return Split::token(data.len(), self.trim.apply(data));
        }
        split
    }
}

impl Tokenize for Splitter {
    fn tokenize<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        self.tokenize_at(data, at_eof, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsplit_core::{split_all, SplitFunc};
    use std::time::Duration;

    fn line_start(flush_at_eof: bool) -> Splitter {
        SplitterConfig {
            multiline: MultilineConfig::line_start("START"),
            ..SplitterConfig::default()
        }
        .build(flush_at_eof, 1024)
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SplitterConfig::default();
        assert_eq!(config.encoding, "utf-8");
        assert_eq!(config.flusher.period, Duration::from_millis(500));
        assert_eq!(config.multiline, MultilineConfig::default());
        assert!(!config.preserve_leading_whitespaces);
        assert!(!config.preserve_trailing_whitespaces);
        assert_eq!(config.trim(), Trim::Both);
    }

    #[test]
    fn test_from_toml() {
        let config = SplitterConfig::from_toml_str(
            r#"
encoding = "utf-16le"
force_flush_period_ms = 250
preserve_leading_whitespaces = true

[multiline]
line_start_pattern = '^\d{4}'
"#,
        )
        .unwrap();

        assert_eq!(config.encoding, "utf-16le");
        assert_eq!(config.flusher.period, Duration::from_millis(250));
        assert_eq!(config.multiline.line_start_pattern, r"^\d{4}");
        assert!(config.multiline.line_end_pattern.is_empty());
        assert!(config.preserve_leading_whitespaces);
        assert!(!config.preserve_trailing_whitespaces);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            SplitterConfig::from_toml_str("").unwrap(),
            SplitterConfig::default()
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SplitterConfig {
            multiline: MultilineConfig::line_end("END$"),
            ..SplitterConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("force_flush_period_ms = 500"));
        assert_eq!(SplitterConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_toml() {
        let err = SplitterConfig::from_toml_str("encoding = [").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unknown_encoding() {
        let config = SplitterConfig {
            encoding: "klingon".to_string(),
            ..SplitterConfig::default()
        };
        assert!(matches!(
            config.build(true, 1024),
            Err(EngineError::UnknownEncoding { .. })
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_reports_pattern_errors() {
        let config = SplitterConfig {
            multiline: MultilineConfig {
                line_start_pattern: "a".to_string(),
                line_end_pattern: "b".to_string(),
            },
            ..SplitterConfig::default()
        };
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_build_composes_strategy() {
        let config = SplitterConfig {
            multiline: MultilineConfig::line_start("START"),
            ..SplitterConfig::default()
        };
        let mut splitter = config.build(true, 1024).unwrap();
        assert_eq!(splitter.strategy().name(), "line_start");
        assert_eq!(splitter.encoding(), Encoding::default());

        let records = split_all(&mut splitter, b"START a\nmiddle\nSTART b\n");
        assert_eq!(
            records,
            vec![b"START a\nmiddle".to_vec(), b"START b".to_vec()]
        );
    }

    #[test]
    fn test_nop_encoding_builds_no_split() {
        let config = SplitterConfig {
            encoding: "nop".to_string(),
            ..SplitterConfig::default()
        };
        let mut splitter = config.build(true, 4).unwrap();
        assert_eq!(splitter.strategy().name(), "no_split");
        assert_eq!(
            split_all(&mut splitter, b"abcdefghij"),
            vec![b"abcd".to_vec(), b"efgh".to_vec(), b"ij".to_vec()]
        );
    }

    #[test]
    fn test_start_match_at_end_of_stream_is_flushed() {
        let mut splitter = line_start(true);
        let data = b"START a\nSTART";
        assert_eq!(splitter.tokenize(data, false), Split::token(8, b"START a"));
        assert!(splitter.tokenize(&data[8..], false).is_pending());
        assert_eq!(splitter.tokenize(&data[8..], true), Split::token(5, b"START"));
        assert!(splitter.tokenize(b"", true).is_pending());

        assert_eq!(
            split_all(&mut line_start(true), b"START a\nSTART"),
            vec![b"START a".to_vec(), b"START".to_vec()]
        );
    }

    #[test]
    fn test_end_of_stream_flush_uses_trim_policy() {
        let mut splitter = SplitterConfig {
            multiline: MultilineConfig::line_start("START"),
            preserve_leading_whitespaces: true,
            ..SplitterConfig::default()
        }
        .build(true, 1024)
        .unwrap();
        assert_eq!(splitter.tokenize(b"  START", true), Split::token(7, b"  START"));
    }

    #[test]
    fn test_no_end_of_stream_flush_when_disabled() {
        let mut splitter = line_start(false);
        assert!(splitter.tokenize(b"START", true).is_pending());
    }

    #[test]
    fn test_nop_forced_flush_keeps_raw_bytes() {
        let config = SplitterConfig {
            encoding: "nop".to_string(),
            flusher: FlusherConfig::new(Duration::from_millis(10)),
            ..SplitterConfig::default()
        };
        let mut splitter = config.build(false, 1024).unwrap();
        let start = Instant::now();

        assert!(splitter.tokenize_at(b"  raw\n", false, start).is_pending());
        assert_eq!(
            splitter.tokenize_at(b"  raw\n", false, start + Duration::from_millis(11)),
            Split::token(6, b"  raw\n")
        );
    }
}
