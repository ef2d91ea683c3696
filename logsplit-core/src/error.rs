//! Errors raised while constructing boundary strategies
//!
//! Strategies never fail once built; everything here is a build-time error.

use thiserror::Error;

/// Strategy construction errors
#[derive(Debug, Error)]
pub enum CoreError {
    /// The boundary pattern is not a valid regular expression
    #[error("invalid boundary pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as configured, without the multi-line flag
        pattern: String,
        /// The regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A delimiter byte sequence was empty
    #[error("{0} delimiter must not be empty")]
    EmptyDelimiter(&'static str),

    /// The maximum record size must be positive
    #[error("max log size must be greater than 0")]
    InvalidMaxLogSize,
}

/// Result type for strategy construction
pub type Result<T> = std::result::Result<T, CoreError>;
