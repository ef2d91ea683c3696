//! Plain text output formatter

use super::{OutputFormatter, RecordEntry};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs records separated by newlines
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_record(&mut self, record: &RecordEntry<'_>) -> Result<()> {
        writeln!(self.writer, "{}", record.text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
