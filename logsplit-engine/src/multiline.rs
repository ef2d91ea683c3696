//! Multiline policy: validation and strategy selection

use crate::encoding::Encoding;
use crate::error::{EngineError, Result};
use logsplit_core::{
    LineEndSplit, LineStartSplit, NewlineSplit, NoSplit, SplitFunc, Strategy, Trim,
};
use serde::{Deserialize, Serialize};

/// Which pattern, if any, delimits multiline records
///
/// An empty pattern is unset. At most one of the two may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultilineConfig {
    /// Records begin at each match of this pattern
    pub line_start_pattern: String,
    /// Records end at each match of this pattern
    pub line_end_pattern: String,
}

impl MultilineConfig {
    /// Config with a line-start pattern
    pub fn line_start(pattern: impl Into<String>) -> Self {
        Self {
            line_start_pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Config with a line-end pattern
    pub fn line_end(pattern: impl Into<String>) -> Self {
        Self {
            line_end_pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Check the pattern combination against the encoding
    pub fn validate(&self, encoding: &Encoding) -> Result<()> {
        let start = !self.line_start_pattern.is_empty();
        let end = !self.line_end_pattern.is_empty();

        if start && end {
            return Err(EngineError::ConfigError(
                "only one of line_start_pattern or line_end_pattern can be set".to_string(),
            ));
        }
        if encoding.is_nop() && (start || end) {
            return Err(EngineError::ConfigError(
                "line_start_pattern or line_end_pattern should not be set when using nop encoding"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Build the boundary strategy for this policy
    ///
    /// - `nop` encoding: [`NoSplit`] chunks of `max_log_size` bytes
    /// - no pattern: [`NewlineSplit`] on the encoded newline
    /// - end pattern: [`LineEndSplit`]
    /// - start pattern: [`LineStartSplit`]
    ///
    /// Patterns are compiled with multi-line anchors.
    pub fn build(
        &self,
        encoding: &Encoding,
        flush_at_eof: bool,
        preserve_leading: bool,
        preserve_trailing: bool,
        max_log_size: usize,
    ) -> Result<Strategy> {
        self.validate(encoding)?;

        let trim = Trim::select(preserve_leading, preserve_trailing);
        let strategy: Strategy = if encoding.is_nop() {
            NoSplit::new(max_log_size)?.into()
        } else if !self.line_end_pattern.is_empty() {
            LineEndSplit::new(&self.line_end_pattern, flush_at_eof, trim)?.into()
        } else if !self.line_start_pattern.is_empty() {
            LineStartSplit::new(&self.line_start_pattern, flush_at_eof, trim)?.into()
        } else {
            let delimiters = encoding.delimiters()?;
            NewlineSplit::new(
                &delimiters.newline,
                &delimiters.carriage_return,
                flush_at_eof,
                trim,
            )?
            .into()
        };

        log::debug!(
            "built {} strategy (encoding={}, flush_at_eof={}, trim={:?})",
            strategy.name(),
            encoding.name(),
            flush_at_eof,
            trim
        );

        Ok(strategy)
    }
}
