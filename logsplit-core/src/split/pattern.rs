//! Pattern-delimited multiline records

use super::{flush_remaining, Split, SplitFunc};
use crate::error::{CoreError, Result};
use crate::Trim;
use regex::bytes::Regex;

/// Compile a boundary pattern with multi-line anchors enabled
///
/// `^` and `$` match at line boundaries inside the buffer, not only at its
/// start and end.
pub fn compile_multiline(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?m){pattern}")).map_err(|source| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Records begin at each match of a pattern
///
/// Everything from one match up to the next belongs to one record. Content
/// in front of the first match is emitted as its own record so no data is
/// lost.
#[derive(Debug, Clone)]
pub struct LineStartSplit {
    regex: Regex,
    flush_at_eof: bool,
    trim: Trim,
}

impl LineStartSplit {
    /// Compile `pattern` and create the strategy
    pub fn new(pattern: &str, flush_at_eof: bool, trim: Trim) -> Result<Self> {
        Ok(Self::from_regex(compile_multiline(pattern)?, flush_at_eof, trim))
    }

    /// Create the strategy from an already compiled expression
    pub fn from_regex(regex: Regex, flush_at_eof: bool, trim: Trim) -> Self {
        Self {
            regex,
            flush_at_eof,
            trim,
        }
    }

    /// The compiled expression, including the multi-line flag
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl SplitFunc for LineStartSplit {
    fn split<'a>(&self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        let Some(first) = self.regex.find(data) else {
            return flush_remaining(data, at_eof, self.flush_at_eof, self.trim);
        };

        if first.start() != 0 {
            // Content before the first record start; keep it unless it is
            // only whitespace.
            let prefix = self.trim.apply(&data[..first.start()]);
            if !prefix.is_empty() {
                return Split::token(first.start(), prefix);
            }
        }

        // A match touching the end of the buffer may still grow
        if first.end() == data.len() {
            return Split::Pending;
        }

        if at_eof && self.flush_at_eof {
            return Split::token(data.len(), self.trim.apply(data));
        }

        let offset = first.end() + 1;
        match self.regex.find(&data[offset..]) {
            Some(second) => {
                let next = offset + second.start();
                Split::token(next, self.trim.apply(&data[first.start()..next]))
            }
            None => Split::Pending,
        }
    }

    fn name(&self) -> &'static str {
        "line_start"
    }
}

/// Records end at each match of a pattern; the match stays in the record
#[derive(Debug, Clone)]
pub struct LineEndSplit {
    regex: Regex,
    flush_at_eof: bool,
    trim: Trim,
}

impl LineEndSplit {
    /// Compile `pattern` and create the strategy
    pub fn new(pattern: &str, flush_at_eof: bool, trim: Trim) -> Result<Self> {
        Ok(Self::from_regex(compile_multiline(pattern)?, flush_at_eof, trim))
    }

    /// Create the strategy from an already compiled expression
    pub fn from_regex(regex: Regex, flush_at_eof: bool, trim: Trim) -> Self {
        Self {
            regex,
            flush_at_eof,
            trim,
        }
    }

    /// The compiled expression, including the multi-line flag
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl SplitFunc for LineEndSplit {
    fn split<'a>(&self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        let Some(found) = self.regex.find(data) else {
            return flush_remaining(data, at_eof, self.flush_at_eof, self.trim);
        };

        // A match ending one byte short of the buffer end may be incomplete.
        // This compares against len - 1, not len.
        if found.end() + 1 == data.len() && !at_eof {
            return Split::Pending;
        }

        Split::token(found.end(), self.trim.apply(&data[..found.end()]))
    }

    fn name(&self) -> &'static str {
        "line_end"
    }
}
