//! Layered error types
//!
//! Configuration and encoding errors are raised while a tokenizer is built;
//! I/O and progress errors are raised by the read loop. A built tokenizer
//! never fails on its own.

use logsplit_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Strategy construction failed (invalid pattern, empty delimiter, bad size)
    #[error("invalid configuration: {0}")]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// The codec cannot represent a delimiter character
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// No codec is registered under the configured name
    #[error("unsupported encoding '{name}'")]
    UnknownEncoding {
        /// The configured encoding name
        name: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// The tokenizer reported consuming more bytes than it was given
    #[error("tokenizer advanced {advance} bytes with only {available} available")]
    InvalidAdvance {
        /// Reported advance
        advance: usize,
        /// Bytes in the buffer
        available: usize,
    },

    /// The tokenizer kept emitting empty records without consuming input
    #[error("tokenizer produced too many empty records without progressing")]
    NoProgress,
}

impl EngineError {
    /// Whether this error comes from invalid user configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, EngineError::Core(_) | EngineError::ConfigError(_))
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::ConfigError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
