//! JSON output formatter

use super::{OutputFormatter, RecordEntry};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs records as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<RecordData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordData {
    /// Source file
    pub file: String,
    /// Position of the record within its file
    pub index: usize,
    /// Byte offset of the record within its file
    pub offset: u64,
    /// The record text
    pub text: String,
    /// Length of the text in bytes
    pub length: usize,
    /// The record was cut at the size limit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_record(&mut self, record: &RecordEntry<'_>) -> Result<()> {
        self.records.push(RecordData {
            file: record.file.to_string(),
            index: record.index,
            offset: record.offset,
            text: record.text.to_string(),
            length: record.text.len(),
            truncated: record.truncated,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
