//! Log processor and builder
//!
//! Ties a [`SplitterConfig`] and a [`ReaderConfig`] together and runs whole
//! inputs through a [`Scanner`].

use crate::{
    config::ReaderConfig,
    encoding::Encoding,
    error::Result,
    input::Input,
    multiline::MultilineConfig,
    scanner::{Record, Scanner},
    splitter::{Splitter, SplitterConfig},
};
use std::borrow::Cow;
use std::io::Read;
use std::time::{Duration, Instant};

/// Splits inputs into records
#[derive(Debug, Clone)]
pub struct LogProcessor {
    splitter: SplitterConfig,
    reader: ReaderConfig,
    encoding: Encoding,
}

/// Records with processing metadata
#[derive(Debug, Clone)]
pub struct Output {
    /// Records in stream order
    pub records: Vec<Record>,
    /// Processing metadata
    pub metadata: ProcessingMetadata,
}

/// Processing metadata
#[derive(Debug, Clone, Default)]
pub struct ProcessingMetadata {
    /// Total bytes consumed from the input
    pub bytes_processed: u64,
    /// Number of records emitted
    pub records: usize,
    /// Number of records cut at `max_log_size`
    pub truncated: usize,
    /// Trailing bytes no record claimed at end of input
    pub dropped_bytes: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

impl Output {
    /// Decode every record with the given encoding
    pub fn texts(&self, encoding: Encoding) -> Vec<Cow<'_, str>> {
        self.records
            .iter()
            .map(|record| encoding.decode(&record.bytes))
            .collect()
    }
}

impl LogProcessor {
    /// Processor with default settings: UTF-8, newline records, trim both
    pub fn new() -> Result<Self> {
        Self::with_config(SplitterConfig::default(), ReaderConfig::default())
    }

    /// Processor with explicit configuration
    ///
    /// Both configurations are validated up front, so a built processor
    /// only fails on I/O.
    pub fn with_config(splitter: SplitterConfig, reader: ReaderConfig) -> Result<Self> {
        reader.validate()?;
        splitter.build(reader.flush_at_eof, reader.max_log_size)?;
        let encoding = splitter.resolve_encoding()?;
        Ok(Self {
            splitter,
            reader,
            encoding,
        })
    }

    /// The splitter configuration
    pub fn splitter_config(&self) -> &SplitterConfig {
        &self.splitter
    }

    /// The reader configuration
    pub fn reader_config(&self) -> &ReaderConfig {
        &self.reader
    }

    /// The resolved encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Open a streaming scanner over `input`
    ///
    /// Each call builds a fresh tokenizer, so scanners never share flush
    /// state.
    pub fn scan(&self, input: Input) -> Result<Scanner<Box<dyn Read + Send>, Splitter>> {
        let splitter = self
            .splitter
            .build(self.reader.flush_at_eof, self.reader.max_log_size)?;
        Scanner::new(input.open()?, splitter, self.reader)
    }

    /// Split the whole input and return every record
    pub fn process(&self, input: Input) -> Result<Output> {
        let start = Instant::now();
        let mut scanner = self.scan(input)?;

        let mut records = Vec::new();
        while let Some(record) = scanner.next_record()? {
            records.push(record);
        }

        let metadata = ProcessingMetadata {
            bytes_processed: scanner.bytes_consumed(),
            records: records.len(),
            truncated: records.iter().filter(|r| r.truncated).count(),
            dropped_bytes: scanner.bytes_dropped(),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        log::debug!(
            "split {} bytes into {} records ({} truncated, {} bytes dropped)",
            metadata.bytes_processed,
            metadata.records,
            metadata.truncated,
            metadata.dropped_bytes
        );

        Ok(Output { records, metadata })
    }

    /// Split text and decode each record (convenience method)
    pub fn process_text(&self, text: &str) -> Result<Vec<String>> {
        let output = self.process(Input::from_text(text))?;
        Ok(output
            .texts(self.encoding)
            .into_iter()
            .map(Cow::into_owned)
            .collect())
    }
}

/// Builder for [`LogProcessor`]
#[derive(Debug, Clone, Default)]
pub struct LogProcessorBuilder {
    splitter: SplitterConfig,
    reader: ReaderConfig,
}

impl LogProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing splitter configuration
    pub fn splitter_config(mut self, config: SplitterConfig) -> Self {
        self.splitter = config;
        self
    }

    /// Start from an existing reader configuration
    pub fn reader_config(mut self, config: ReaderConfig) -> Self {
        self.reader = config;
        self
    }

    /// Set the encoding name
    pub fn encoding<S: Into<String>>(mut self, name: S) -> Self {
        self.splitter.encoding = name.into();
        self
    }

    /// Records begin at each match of `pattern`
    pub fn line_start_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.splitter.multiline = MultilineConfig::line_start(pattern);
        self
    }

    /// Records end at each match of `pattern`
    pub fn line_end_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.splitter.multiline = MultilineConfig::line_end(pattern);
        self
    }

    /// Keep leading whitespace
    pub fn preserve_leading_whitespaces(mut self, preserve: bool) -> Self {
        self.splitter.preserve_leading_whitespaces = preserve;
        self
    }

    /// Keep trailing whitespace
    pub fn preserve_trailing_whitespaces(mut self, preserve: bool) -> Self {
        self.splitter.preserve_trailing_whitespaces = preserve;
        self
    }

    /// Idle period before a forced flush; zero disables it
    pub fn force_flush_period(mut self, period: Duration) -> Self {
        self.splitter.flusher.period = period;
        self
    }

    /// Largest record before truncation
    pub fn max_log_size(mut self, size: usize) -> Self {
        self.reader.max_log_size = size;
        self
    }

    /// Emit trailing unterminated content at end of input
    pub fn flush_at_eof(mut self, flush: bool) -> Self {
        self.reader.flush_at_eof = flush;
        self
    }

    /// Bytes requested per read
    pub fn read_size(mut self, size: usize) -> Self {
        self.reader.read_size = size;
        self
    }

    /// Use the live-stream preset
    pub fn follow(mut self) -> Self {
        self.reader = ReaderConfig {
            flush_at_eof: false,
            ..self.reader
        };
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<LogProcessor> {
        LogProcessor::with_config(self.splitter, self.reader)
    }
}
