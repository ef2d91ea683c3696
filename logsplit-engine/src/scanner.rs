//! Read loop driving a tokenizer over a byte source
//!
//! The scanner owns the buffer. It hands the tokenizer a read-only view of
//! the unconsumed bytes, slides the window forward by the reported advance,
//! and reads more whenever the tokenizer asks for it. At most `max_log_size`
//! bytes are ever buffered.

use crate::{
    config::ReaderConfig,
    error::{EngineError, Result},
};
use logsplit_core::{Split, Tokenize, MAX_EMPTY_TOKENS};
use std::io::{ErrorKind, Read};

/// One record cut from a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Stream offset of the first byte consumed for this record
    pub offset: u64,
    /// The trimmed record payload in the stream's encoding
    pub bytes: Vec<u8>,
    /// The record hit the size limit and was cut short
    pub truncated: bool,
}

/// Incremental record reader
pub struct Scanner<R, T> {
    reader: R,
    tokenizer: T,
    config: ReaderConfig,
    buffer: Vec<u8>,
    start: usize,
    end: usize,
    offset: u64,
    dropped: u64,
    eof: bool,
    done: bool,
    empty_tokens: usize,
}

impl<R: Read, T: Tokenize> Scanner<R, T> {
    /// Create a scanner reading from `reader`
    pub fn new(reader: R, tokenizer: T, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            tokenizer,
            config,
            buffer: Vec::new(),
            start: 0,
            end: 0,
            offset: 0,
            dropped: 0,
            eof: false,
            done: false,
            empty_tokens: 0,
        })
    }

    /// Total bytes consumed so far
    pub fn bytes_consumed(&self) -> u64 {
        self.offset
    }

    /// Bytes left unconsumed at end of stream because no record claimed them
    pub fn bytes_dropped(&self) -> u64 {
        self.dropped
    }

    /// The tokenizer driven by this scanner
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` once the stream is exhausted and the tokenizer has
    /// nothing left to emit.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.done {
            return Ok(None);
        }

        loop {
            if self.end > self.start || self.eof {
                let available = self.end - self.start;
                let outcome = match self
                    .tokenizer
                    .tokenize(&self.buffer[self.start..self.end], self.eof)
                {
                    Split::Pending => None,
                    Split::Token { advance, token } => Some((advance, token.to_vec())),
                };

                match outcome {
                    Some((advance, bytes)) => return self.emit(advance, bytes, available).map(Some),
                    None if self.eof => {
                        self.finish(available);
                        return Ok(None);
                    }
                    None if available >= self.config.max_log_size => {
                        return self.truncate().map(Some);
                    }
                    None => {}
                }
            }

            self.fill()?;
        }
    }

    /// Collect every remaining record
    pub fn collect_records(mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }

    fn emit(&mut self, advance: usize, bytes: Vec<u8>, available: usize) -> Result<Record> {
        if advance > available {
            self.done = true;
            return Err(EngineError::InvalidAdvance { advance, available });
        }

        if advance == 0 {
            self.empty_tokens += 1;
            if self.empty_tokens > MAX_EMPTY_TOKENS {
                self.done = true;
                return Err(EngineError::NoProgress);
            }
        } else {
            self.empty_tokens = 0;
        }

        let record = Record {
            offset: self.offset,
            bytes,
            truncated: false,
        };
        self.consume(advance);
        Ok(record)
    }

    fn truncate(&mut self) -> Result<Record> {
        let size = self.config.max_log_size;
        log::warn!(
            "record at offset {} exceeds max_log_size ({} bytes), truncating",
            self.offset,
            size
        );

        let record = Record {
            offset: self.offset,
            bytes: self.buffer[self.start..self.start + size].to_vec(),
            truncated: true,
        };
        self.consume(size);
        self.empty_tokens = 0;
        Ok(record)
    }

    fn finish(&mut self, remaining: usize) {
        if remaining > 0 {
            log::warn!(
                "dropping {} unterminated bytes at offset {} at end of stream",
                remaining,
                self.offset
            );
            self.dropped += remaining as u64;
            self.start = self.end;
        }
        self.done = true;
    }

    fn consume(&mut self, advance: usize) {
        self.start += advance;
        self.offset += advance as u64;
    }

    /// Move unconsumed bytes to the front and read once more
    fn fill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buffer.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        // Never buffer more than one record's worth of bytes
        let room = self.config.max_log_size.saturating_sub(self.end);
        let wanted = self.end + room.min(self.config.read_size);
        if self.buffer.len() < wanted {
            self.buffer.resize(wanted, 0);
        }

        loop {
            match self.reader.read(&mut self.buffer[self.end..wanted]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Err(e.into());
                }
            }
        }
    }
}

impl<R: Read, T: Tokenize> Iterator for Scanner<R, T> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
