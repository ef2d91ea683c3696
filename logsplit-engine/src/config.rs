//! Reader configuration

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Default upper bound for a single record, in bytes
pub const DEFAULT_MAX_LOG_SIZE: usize = 1024 * 1024;

/// Default number of bytes requested per read
pub const DEFAULT_READ_SIZE: usize = 16 * 1024;

/// Settings of the read loop that feeds a tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Largest record the reader buffers before truncating
    pub max_log_size: usize,
    /// Emit trailing unterminated content once the stream ends
    pub flush_at_eof: bool,
    /// Bytes requested from the source per read
    pub read_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_log_size: DEFAULT_MAX_LOG_SIZE,
            flush_at_eof: true,
            read_size: DEFAULT_READ_SIZE,
        }
    }
}

impl ReaderConfig {
    /// Configuration for following a live stream: trailing partial records
    /// are left to the idle flusher instead of being flushed at end of input
    pub fn follow() -> Self {
        Self {
            flush_at_eof: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_log_size == 0 {
            return Err(EngineError::ConfigError(
                "max_log_size must be greater than 0".to_string(),
            ));
        }
        if self.read_size == 0 {
            return Err(EngineError::ConfigError(
                "read_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
