//! Raw fixed-size chunking for streams without a character encoding

use super::{Split, SplitFunc};
use crate::error::{CoreError, Result};

/// Emits the stream in chunks of at most `max_log_size` bytes
///
/// Nothing is trimmed: without an encoding there is no notion of whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSplit {
    max_log_size: usize,
}

impl NoSplit {
    /// Create the strategy; `max_log_size` must be positive
    pub fn new(max_log_size: usize) -> Result<Self> {
        if max_log_size == 0 {
            return Err(CoreError::InvalidMaxLogSize);
        }
        Ok(Self { max_log_size })
    }

    /// Size of a full chunk
    pub fn max_log_size(&self) -> usize {
        self.max_log_size
    }
}

impl SplitFunc for NoSplit {
    fn split<'a>(&self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        if data.len() >= self.max_log_size {
            return Split::token(self.max_log_size, &data[..self.max_log_size]);
        }

        if !at_eof || data.is_empty() {
            return Split::Pending;
        }

        Split::token(data.len(), data)
    }

    fn name(&self) -> &'static str {
        "no_split"
    }
}
