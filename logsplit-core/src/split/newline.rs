//! Newline-delimited records

use super::{flush_remaining, Split, SplitFunc};
use crate::error::{CoreError, Result};
use crate::Trim;

/// Splits on an encoded newline, dropping one encoded carriage return that
/// precedes it
///
/// The delimiters are byte sequences in the stream's character set, so a
/// UTF-16 stream splits on `0A 00` rather than a bare `0A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewlineSplit {
    newline: Vec<u8>,
    carriage_return: Vec<u8>,
    flush_at_eof: bool,
    trim: Trim,
}

impl NewlineSplit {
    /// Create the strategy from resolved delimiter bytes
    pub fn new(
        newline: &[u8],
        carriage_return: &[u8],
        flush_at_eof: bool,
        trim: Trim,
    ) -> Result<Self> {
        if newline.is_empty() {
            return Err(CoreError::EmptyDelimiter("newline"));
        }
        if carriage_return.is_empty() {
            return Err(CoreError::EmptyDelimiter("carriage return"));
        }

        Ok(Self {
            newline: newline.to_vec(),
            carriage_return: carriage_return.to_vec(),
            flush_at_eof,
            trim,
        })
    }

    /// The newline byte sequence
    pub fn newline(&self) -> &[u8] {
        &self.newline
    }

    /// The carriage-return byte sequence
    pub fn carriage_return(&self) -> &[u8] {
        &self.carriage_return
    }
}

impl SplitFunc for NewlineSplit {
    fn split<'a>(&self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        if at_eof && data.is_empty() {
            return Split::Pending;
        }

        if let Some(i) = find(data, &self.newline) {
            let line = &data[..i];
            let line = line.strip_suffix(self.carriage_return.as_slice()).unwrap_or(line);
            return Split::token(i + self.newline.len(), self.trim.apply(line));
        }

        flush_remaining(data, at_eof, self.flush_at_eof, self.trim)
    }

    fn name(&self) -> &'static str {
        "newline"
    }
}

/// Offset of the first occurrence of `needle` in `haystack`
///
/// A multi-byte needle is one code unit of a fixed-width encoding, so only
/// offsets aligned to its width are considered. Otherwise the high byte of
/// one UTF-16 unit and the low byte of the next could pass for a newline.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    match needle {
        [byte] => haystack.iter().position(|b| b == byte),
        _ => haystack
            .chunks_exact(needle.len())
            .position(|unit| unit == needle)
            .map(|index| index * needle.len()),
    }
}
