//! Output formatting module

use anyhow::Result;

/// One decoded record ready for output
#[derive(Debug, Clone, Copy)]
pub struct RecordEntry<'a> {
    /// Source file
    pub file: &'a str,
    /// Position of the record within its file
    pub index: usize,
    /// Byte offset of the record within its file
    pub offset: u64,
    /// Decoded record text
    pub text: &'a str,
    /// The record was cut at the size limit
    pub truncated: bool,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single record
    fn format_record(&mut self, record: &RecordEntry<'_>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
